use std::path::Path;

use clap::Parser;
use colored::Colorize;

use crate::config::{PackageManager, ScaffoldConfig};
use crate::env_check::{check_node_version, check_package_manager, check_target_absent};
use crate::executor::{ShellRunner, execute_plan};
use crate::history::{self, RunRecord, RunStatus};
use crate::planner::build_plan;

#[derive(Debug, Parser)]
#[command(
    name = "react-kickstart",
    version,
    about = "Scaffold a React + TypeScript app with linting, testing and commit tooling"
)]
pub struct Cli {
    /// Name of the application to create
    app_name: String,
    /// Use NPM as the package manager
    #[arg(long)]
    npm: bool,
    /// Install and set up commitizen
    #[arg(long)]
    commitizen: bool,
    /// Print the plan as JSON without executing it
    #[arg(long)]
    dry_run: bool,
    /// Emit compact JSON instead of pretty output (with --dry-run)
    #[arg(long)]
    raw: bool,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    check_node_version()?;
    check_target_absent(Path::new(&cli.app_name))?;

    let package_manager = if cli.npm {
        PackageManager::Npm
    } else {
        PackageManager::Yarn
    };
    check_package_manager(package_manager)?;

    if cli.npm {
        println!(
            "{}",
            "Detected --npm flag. NPM will be used as the package manager for this install."
                .yellow()
        );
    }

    let config = ScaffoldConfig {
        app_name: cli.app_name,
        package_manager,
        commitizen: cli.commitizen,
    };
    let plan = build_plan(&config)?;

    if cli.dry_run {
        if cli.raw {
            println!("{}", serde_json::to_string(&plan)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        return Ok(());
    }

    let outcome = execute_plan(&plan, &mut ShellRunner);

    let status = if outcome.is_ok() {
        RunStatus::Success
    } else {
        RunStatus::Failed
    };
    if let Err(err) = history::add_run_record(RunRecord::new(&config, status)) {
        eprintln!("{}", format!("could not record run history: {err:#}").yellow());
    }

    outcome?;
    Ok(())
}
