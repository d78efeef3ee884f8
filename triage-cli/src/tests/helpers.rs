//! Test helpers for laying out input directories and pinning the clock.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use tempfile::TempDir;

use crate::rank::{CASE_FILE, Clock, DATASET_FILE};

pub(super) const SAMPLE_DATASET: &str = r#"[
  {
    "id": "h-1",
    "name": "City General",
    "location": {"lat": 44.43, "lng": 26.105},
    "capacity": 120,
    "specializations": ["Emergency", "Pediatrics"]
  },
  {
    "id": "h-2",
    "name": "Heart Institute",
    "location": {"lat": 44.45, "lng": 26.13},
    "capacity": 60,
    "specializations": ["Cardiology"]
  },
  {
    "id": 3,
    "name": "Riverside Clinic",
    "location": {"lat": 44.435, "lng": 26.09},
    "capacity": 35,
    "specializations": ["General"]
  },
  {
    "id": "h-4",
    "name": "Outpost",
    "location": {"lat": 45.2, "lng": 27.4},
    "capacity": 10,
    "specializations": []
  }
]"#;

pub(super) const SAMPLE_CASE: &str = r#"{
  "emergency": {
    "emergencyId": "E-100",
    "type": "cardiac",
    "location": {"lat": 44.4268, "lng": 26.1025},
    "severity": 8
  }
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents).expect("write test file");
}

pub(super) fn read_utf8(path: &Utf8Path) -> String {
    fs::read_to_string(path).expect("read test file")
}

/// Temporary inputs and outputs directories for a single run.
#[derive(Debug)]
pub(super) struct Workspace {
    _tmp: TempDir,
    pub(super) inputs_dir: Utf8PathBuf,
    pub(super) output_dir: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self {
            _tmp: tmp,
            inputs_dir: root.join("inputs"),
            output_dir: root.join("outputs"),
        }
    }

    pub(super) fn dataset_path(&self) -> Utf8PathBuf {
        self.inputs_dir.join(DATASET_FILE)
    }

    pub(super) fn case_path(&self) -> Utf8PathBuf {
        self.inputs_dir.join(CASE_FILE)
    }

    pub(super) fn write_dataset(&self, contents: &str) {
        write_utf8(&self.dataset_path(), contents.as_bytes());
    }

    pub(super) fn write_case(&self, contents: &str) {
        write_utf8(&self.case_path(), contents.as_bytes());
    }

    pub(super) fn write_samples(&self) {
        self.write_dataset(SAMPLE_DATASET);
        self.write_case(SAMPLE_CASE);
    }
}

/// Clock pinned to a single instant.
pub(super) struct FixedClock(pub(super) DateTime<Utc>);

impl FixedClock {
    pub(super) fn new() -> Self {
        Self(
            Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0)
                .single()
                .expect("valid timestamp"),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
