use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ScaffoldConfig;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failed,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RunRecord {
    pub app_name: String,
    pub package_manager: String,
    pub commitizen: bool,
    pub timestamp: DateTime<Utc>,
    pub status: RunStatus,
}

impl RunRecord {
    pub fn new(config: &ScaffoldConfig, status: RunStatus) -> Self {
        Self {
            app_name: config.app_name.clone(),
            package_manager: config.package_manager.to_string(),
            commitizen: config.commitizen,
            timestamp: Utc::now(),
            status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct History {
    #[serde(default)]
    pub runs: Vec<RunRecord>,
}

/// Append a record of one scaffolding run to the per-user history file.
pub fn add_run_record(record: RunRecord) -> anyhow::Result<()> {
    let path = history_file_path()?;
    let mut history = load_from(&path)?;
    history.runs.push(record);
    save_to(&path, &history)
}

pub fn load_history() -> anyhow::Result<History> {
    load_from(&history_file_path()?)
}

fn load_from(path: &Path) -> anyhow::Result<History> {
    if !path.exists() {
        return Ok(History::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("reading history file at {}", path.display()))?;
    let history: History = serde_json::from_str(&data)
        .with_context(|| format!("parsing history file at {}", path.display()))?;
    Ok(history)
}

fn save_to(path: &Path, history: &History) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating history directory {}", parent.display()))?;
    }

    let tmp_path = path.with_extension("tmp");
    let data = serde_json::to_string_pretty(history)?;
    fs::write(&tmp_path, data)
        .with_context(|| format!("writing temp history file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("committing history file to {}", path.display()))?;
    Ok(())
}

fn history_file_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .ok_or_else(|| anyhow!("could not determine platform data directory"))?
        .join("react-kickstart");
    Ok(base.join("history.json"))
}
