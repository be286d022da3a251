//! Greedy route construction.
//!
//! The builder walks an explicit state machine:
//!
//! ```text
//! Init -> Selecting -> Added -> Selecting -> ... -> Exhausted -> Terminal
//! ```
//!
//! Each selection round rescans every unvisited candidate, so building a
//! route over `n` POIs costs `O(n²)` score evaluations in the worst case.
//! Candidates are scanned in ascending id order and only a strictly better
//! score displaces the incumbent, so ties go to the smaller id regardless of
//! the order the caller supplied.

use geo::Coord;
use log::{debug, warn};
use ramble_core::{
    ClosingLeg, ClosingLegPolicy, InterestProfile, PlanningRequest, Poi, RouteStep, Scorer,
    ScoringContext, Termination, haversine_km, walking_minutes,
};

/// Builder states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    Selecting,
    Added,
    Exhausted(Termination),
    Terminal(Termination),
}

/// What the builder produced.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BuildOutcome {
    pub(crate) steps: Vec<RouteStep>,
    pub(crate) closing_leg: Option<ClosingLeg>,
    pub(crate) termination: Termination,
    pub(crate) iterations: usize,
    pub(crate) evaluations: usize,
}

/// A feasible candidate and what visiting it would cost.
#[derive(Debug, Clone, Copy)]
struct Choice {
    index: usize,
    score: f64,
    distance_km: f64,
    walking_minutes: f64,
    visit_minutes: f64,
}

impl Choice {
    #[expect(clippy::float_arithmetic, reason = "a stop costs its walk plus its visit")]
    fn required_minutes(&self) -> f64 {
        self.walking_minutes + self.visit_minutes
    }
}

/// Working state for a single planning call.
pub(crate) struct RouteBuilder<'a, C> {
    scorer: &'a C,
    request: &'a PlanningRequest,
    profile: Option<&'a InterestProfile>,
    candidates: Vec<&'a Poi>,
    visited: Vec<bool>,
    location: Coord<f64>,
    remaining_minutes: f64,
    steps: Vec<RouteStep>,
    iteration_cap: usize,
    iterations: usize,
    evaluations: usize,
}

impl<'a, C: Scorer> RouteBuilder<'a, C> {
    /// Prepare a builder over `pois`.
    ///
    /// Candidates are ordered by id. When ids repeat, the first occurrence in
    /// input order wins and later ones are dropped with a warning.
    pub(crate) fn new(
        scorer: &'a C,
        request: &'a PlanningRequest,
        profile: Option<&'a InterestProfile>,
        pois: &'a [Poi],
        max_iterations: usize,
    ) -> Self {
        let candidates = unique_by_id(pois);
        Self {
            scorer,
            request,
            profile,
            visited: vec![false; candidates.len()],
            candidates,
            location: request.start,
            remaining_minutes: request.duration_minutes,
            steps: Vec::new(),
            iteration_cap: max_iterations,
            iterations: 0,
            evaluations: 0,
        }
    }

    /// Run the state machine to completion.
    pub(crate) fn build(mut self) -> BuildOutcome {
        let mut state = State::Init;
        loop {
            let next = match state {
                State::Init => self.init(),
                State::Selecting => self.select(),
                State::Added => State::Selecting,
                State::Exhausted(reason) => {
                    self.close();
                    State::Terminal(reason)
                }
                State::Terminal(termination) => {
                    return BuildOutcome {
                        closing_leg: self.closing_leg(),
                        steps: self.steps,
                        termination,
                        iterations: self.iterations,
                        evaluations: self.evaluations,
                    };
                }
            };
            if next != State::Added && next != State::Selecting {
                debug!("route builder {state:?} -> {next:?}");
            }
            state = next;
        }
    }

    fn init(&self) -> State {
        if self.candidates.is_empty() || self.request.duration_minutes <= 0.0 {
            debug!(
                "nothing to plan: {} candidates, {} minute budget",
                self.candidates.len(),
                self.request.duration_minutes
            );
            return State::Exhausted(Termination::EmptyRequest);
        }
        State::Selecting
    }

    fn select(&mut self) -> State {
        if self.iterations >= self.iteration_cap {
            warn!(
                "route builder stopped after {} iterations over {} candidates",
                self.iterations,
                self.candidates.len()
            );
            return State::Exhausted(Termination::IterationCap);
        }
        let Some(shortest_visit) = self.shortest_remaining_visit() else {
            return State::Exhausted(Termination::CandidatesExhausted);
        };
        if self.remaining_minutes < shortest_visit {
            return State::Exhausted(Termination::BudgetBelowMinimumVisit);
        }
        self.iterations = self.iterations.saturating_add(1);

        let Some(choice) = self.best_feasible() else {
            return State::Exhausted(Termination::NoFeasibleCandidate);
        };
        self.add(choice);
        State::Added
    }

    fn shortest_remaining_visit(&self) -> Option<f64> {
        self.unvisited()
            .map(|(_, poi)| self.request.visit_minutes_for(poi))
            .reduce(f64::min)
    }

    fn unvisited(&self) -> impl Iterator<Item = (usize, &'a Poi)> + '_ {
        self.candidates
            .iter()
            .zip(&self.visited)
            .enumerate()
            .filter(|(_, (_, visited))| !**visited)
            .map(|(index, (poi, _))| (index, *poi))
    }

    fn best_feasible(&mut self) -> Option<Choice> {
        let ctx = ScoringContext::new(self.location, self.profile, self.request);
        let mut best: Option<Choice> = None;
        let mut evaluations = 0_usize;
        for (index, poi) in self.unvisited() {
            let Some(mut choice) = self.feasible_choice(index, poi) else {
                continue;
            };
            choice.score = C::sanitise(self.scorer.score(poi, &ctx));
            evaluations = evaluations.saturating_add(1);
            if best.is_none_or(|incumbent| choice.score > incumbent.score) {
                best = Some(choice);
            }
        }
        self.evaluations = self.evaluations.saturating_add(evaluations);
        best
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "feasibility compares minute totals against the remaining budget"
    )]
    fn feasible_choice(&self, index: usize, poi: &Poi) -> Option<Choice> {
        let speed = self.request.walking_speed_kmh;
        let distance_km = haversine_km(self.location, poi.location);
        let choice = Choice {
            index,
            score: f64::NEG_INFINITY,
            distance_km,
            walking_minutes: walking_minutes(distance_km, speed),
            visit_minutes: self.request.visit_minutes_for(poi),
        };
        let mut required = choice.required_minutes();
        if self.request.circular && self.request.closing_leg == ClosingLegPolicy::Strict {
            let home_km = haversine_km(poi.location, self.request.start);
            required += walking_minutes(home_km, speed);
        }
        (required <= self.remaining_minutes).then_some(choice)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the remaining budget shrinks by the cost of each stop"
    )]
    fn add(&mut self, choice: Choice) {
        let Some(poi) = self.candidates.get(choice.index).copied() else {
            return;
        };
        if let Some(visited) = self.visited.get_mut(choice.index) {
            *visited = true;
        }
        self.remaining_minutes -= choice.required_minutes();
        self.location = poi.location;
        debug!(
            "selected {} (score {:.4}, {:.3} km, {:.1} min left)",
            poi.id, choice.score, choice.distance_km, self.remaining_minutes
        );
        self.steps.push(RouteStep {
            poi: poi.clone(),
            distance_km: choice.distance_km,
            walking_minutes: choice.walking_minutes,
            visit_minutes: choice.visit_minutes,
            score: choice.score,
        });
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the closing leg is charged against the remaining budget"
    )]
    fn close(&mut self) {
        if let Some(leg) = self.closing_leg() {
            self.remaining_minutes -= leg.walking_minutes;
            if self.remaining_minutes < 0.0 {
                debug!(
                    "closing leg overshoots the budget by {:.1} min",
                    -self.remaining_minutes
                );
            }
        }
    }

    fn closing_leg(&self) -> Option<ClosingLeg> {
        if !self.request.circular || self.steps.is_empty() {
            return None;
        }
        let distance_km = haversine_km(self.location, self.request.start);
        Some(ClosingLeg {
            distance_km,
            walking_minutes: walking_minutes(distance_km, self.request.walking_speed_kmh),
        })
    }
}

fn unique_by_id(pois: &[Poi]) -> Vec<&Poi> {
    let mut ordered: Vec<&Poi> = pois.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));
    ordered.dedup_by(|later, kept| {
        let duplicate = later.id == kept.id;
        if duplicate {
            warn!("ignoring duplicate POI id {}", later.id);
        }
        duplicate
    });
    ordered
}
