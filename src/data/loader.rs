use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::RunTuning;

const TUNING_RELATIVE_PATH: &str = "assets/tuning.json";

pub fn tuning_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(TUNING_RELATIVE_PATH)
}

pub fn load_tuning() -> Result<RunTuning> {
    load_tuning_from_path(tuning_path())
}

pub fn load_tuning_from_path(path: impl AsRef<Path>) -> Result<RunTuning> {
    let path = path.as_ref();
    let tuning: RunTuning = read_json(path, "run tuning")?;
    tuning
        .validate()
        .with_context(|| format!("invalid run tuning in {}", path.display()))?;
    Ok(tuning)
}

fn read_json<T>(path: &Path, label: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading {label} file: {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("failed parsing {label} file as JSON: {}", path.display()))
}
