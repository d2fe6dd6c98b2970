use std::fmt;

use serde::Serialize;

/// Package manager driving dependency installation for the generated app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Yarn,
    Npm,
}

impl PackageManager {
    /// Command prefix for adding packages, e.g. `yarn add -D prettier`.
    pub fn install_command(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn add",
            PackageManager::Npm => "npm i",
        }
    }

    /// Command that installs everything listed in package.json.
    pub fn install_all_command(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn install",
            PackageManager::Npm => "npm install",
        }
    }

    /// Lock file written by the *other* manager, removed during cleanup.
    pub fn lock_file_to_remove(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "package-lock.json",
            PackageManager::Npm => "yarn.lock",
        }
    }

    /// Name of the executable on PATH.
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Resolved configuration for one scaffolding run.
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldConfig {
    pub app_name: String,
    pub package_manager: PackageManager,
    pub commitizen: bool,
}
