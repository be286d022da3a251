//! Test helpers for writing catalogs and inputs to a temporary workspace.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Catalog of three Richmond POIs heading north from the market place.
pub(super) const RICHMOND_CATALOG: &str = r#"{
  "pois": [
    {
      "id": "richmond_001",
      "name": "Market Place",
      "geo": { "lat": 54.4025, "lng": -1.7367 },
      "vibe_tags": ["commerce", "community"],
      "visit_minutes": 5
    },
    {
      "id": "richmond_002",
      "name": "Green Howards Museum",
      "geo": { "lat": 54.4034, "lng": -1.7367 },
      "vibe_tags": ["military history"],
      "facts": ["Housed in a former church"],
      "visit_minutes": 10
    },
    {
      "id": "richmond_003",
      "name": "Richmond Castle",
      "geo": { "lat": 54.4052, "lng": -1.7367 },
      "tags": { "historic": "castle" },
      "vibe_tags": ["history", "medieval"],
      "source_reliability": 0.9,
      "visit_minutes": 15
    }
  ]
}"#;

pub(super) const START_LAT: f64 = 54.4025;
pub(super) const START_LNG: f64 = -1.7367;

/// A temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        write_utf8(&path, contents.as_bytes());
        path
    }

    pub(super) fn catalog(&self) -> Utf8PathBuf {
        self.write("catalog.json", RICHMOND_CATALOG)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test input");
}

pub(super) fn output_string(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("utf-8 output")
}
