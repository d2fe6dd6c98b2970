use std::process::Command;

use anyhow::{Context, anyhow};
use colored::Colorize;
use serde::Serialize;

use crate::planner::{Action, Effect, Label, Plan, Step};

#[derive(Debug, Serialize)]
pub struct ExecutionResult {
    pub completed_steps: usize,
    pub total_steps: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("step {step}/{total} '{label}' failed: {message}")]
    StepFailed {
        step: usize,
        total: usize,
        label: String,
        message: String,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Seam to the external shell. The production runner spawns a real shell;
/// tests substitute a recording stub.
pub trait CommandRunner {
    fn run(&mut self, command: &str) -> anyhow::Result<()>;
}

/// Runs each command line through the platform shell with inherited stdio,
/// so child processes talk to the invoking terminal directly.
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&mut self, command: &str) -> anyhow::Result<()> {
        let shell = if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("/bin/sh", "-c")
        };

        let status = Command::new(shell.0)
            .arg(shell.1)
            .arg(command)
            .status()
            .with_context(|| format!("running shell command: {command}"))?;

        if !status.success() {
            return Err(anyhow!("command exited with status {:?}", status.code()));
        }

        Ok(())
    }
}

/// Execute every step of the plan in order, stopping at the first failure.
///
/// Each step gets a numbered header before its actions run; the remaining
/// actions and steps are skipped as soon as one action fails.
pub fn execute_plan(
    plan: &Plan,
    runner: &mut dyn CommandRunner,
) -> Result<ExecutionResult, ExecutionError> {
    let total = plan.len();

    for (idx, step) in plan.steps.iter().enumerate() {
        let current = idx + 1;
        log_step_header(&step.label, current, total);

        if let Err(err) = run_step(step, runner) {
            return Err(ExecutionError::StepFailed {
                step: current,
                total,
                label: step.label.text.clone(),
                message: err.to_string(),
            });
        }
    }

    println!();
    println!("{}", "Finished!".bold());

    Ok(ExecutionResult {
        completed_steps: total,
        total_steps: total,
    })
}

fn log_step_header(label: &Label, current: usize, total: usize) {
    if label.leading_blank {
        println!();
    }
    println!(
        "{}",
        format!("{current}/{total} {}", label.text).green().bold()
    );
    println!("----------------------------");
}

fn run_step(step: &Step, runner: &mut dyn CommandRunner) -> anyhow::Result<()> {
    for action in &step.actions {
        match action {
            Action::Shell(command) => runner.run(command)?,
            Action::Inline(Effect::ChangeDir(dir)) => {
                std::env::set_current_dir(dir)
                    .with_context(|| format!("entering directory {}", dir.display()))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CommandRunner, ExecutionError, execute_plan};
    use crate::config::{PackageManager, ScaffoldConfig};
    use crate::planner::build_plan;

    /// Records every dispatched command and fails once the configured
    /// command count is reached.
    struct StubRunner {
        dispatched: Vec<String>,
        fail_at: Option<usize>,
    }

    impl StubRunner {
        fn new() -> Self {
            Self {
                dispatched: Vec::new(),
                fail_at: None,
            }
        }

        fn failing_at(fail_at: usize) -> Self {
            Self {
                dispatched: Vec::new(),
                fail_at: Some(fail_at),
            }
        }
    }

    impl CommandRunner for StubRunner {
        fn run(&mut self, command: &str) -> anyhow::Result<()> {
            self.dispatched.push(command.to_string());
            if self.fail_at == Some(self.dispatched.len()) {
                return Err(anyhow::anyhow!("stub failure"));
            }
            Ok(())
        }
    }

    /// A plan whose only inline action is a chdir to "." so it can run
    /// without touching the real environment.
    fn harmless_plan(commitizen: bool) -> crate::planner::Plan {
        build_plan(&ScaffoldConfig {
            app_name: ".".to_string(),
            package_manager: PackageManager::Yarn,
            commitizen,
        })
        .unwrap()
    }

    fn planned_commands(plan: &crate::planner::Plan) -> Vec<String> {
        plan.steps
            .iter()
            .flat_map(|step| &step.actions)
            .filter_map(|action| match action {
                crate::planner::Action::Shell(command) => Some(command.clone()),
                crate::planner::Action::Inline(_) => None,
            })
            .collect()
    }

    #[test]
    fn dispatches_every_planned_command_in_order() {
        let plan = harmless_plan(true);
        let mut runner = StubRunner::new();

        let result = execute_plan(&plan, &mut runner).unwrap();

        assert_eq!(result.completed_steps, plan.len());
        assert_eq!(result.total_steps, plan.len());
        assert_eq!(runner.dispatched, planned_commands(&plan));
    }

    #[test]
    fn halts_at_the_first_failing_action() {
        let plan = harmless_plan(false);
        let mut runner = StubRunner::failing_at(3);

        let err = execute_plan(&plan, &mut runner).unwrap_err();

        assert_eq!(runner.dispatched.len(), 3);
        match err {
            ExecutionError::StepFailed { step, total, .. } => {
                assert_eq!(total, plan.len());
                assert!(step <= total);
            }
            other => panic!("expected a step failure, got {other:?}"),
        }
    }

    #[test]
    fn a_failure_in_the_first_action_skips_the_whole_run() {
        let plan = harmless_plan(false);
        let mut runner = StubRunner::failing_at(1);

        let err = execute_plan(&plan, &mut runner).unwrap_err();

        assert_eq!(runner.dispatched.len(), 1);
        match err {
            ExecutionError::StepFailed { step, label, .. } => {
                assert_eq!(step, 1);
                assert_eq!(label, "Creating your React app with create-react-app");
            }
            other => panic!("expected a step failure, got {other:?}"),
        }
    }

    #[test]
    fn failure_message_names_the_failing_step() {
        let plan = harmless_plan(false);
        let mut runner = StubRunner::failing_at(1);

        let err = execute_plan(&plan, &mut runner).unwrap_err();
        let rendered = err.to_string();

        assert!(rendered.contains("1/7"));
        assert!(rendered.contains("create-react-app"));
        assert!(rendered.contains("stub failure"));
    }
}
