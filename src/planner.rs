use std::path::PathBuf;

use serde::Serialize;

use crate::boilerplate;
use crate::config::{PackageManager, ScaffoldConfig};

/// Progress label shown above a step's output.
#[derive(Debug, Clone, Serialize)]
pub struct Label {
    pub text: String,
    /// Whether a blank line separates this header from the previous step.
    pub leading_blank: bool,
}

impl Label {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            leading_blank: true,
        }
    }

    fn first(text: &str) -> Self {
        Self {
            text: text.to_string(),
            leading_blank: false,
        }
    }
}

/// A unit of work within a step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Command line dispatched to the shell runner.
    Shell(String),
    /// Effect performed inside the orchestrator process.
    Inline(Effect),
}

/// The closed set of in-process effects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Change the executor's working directory.
    ChangeDir(PathBuf),
}

/// An ordered, non-empty group of actions sharing one progress label.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub label: Label,
    pub actions: Vec<Action>,
}

impl Step {
    fn new(label: Label, actions: Vec<Action>) -> Self {
        Self { label, actions }
    }
}

/// The complete, ordered list of steps for one run, fixed before execution
/// starts.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub steps: Vec<Step>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn shell(command: impl Into<String>) -> Action {
    Action::Shell(command.into())
}

/// Build the ordered plan for the given configuration.
///
/// Construction is pure: identical configuration always yields an identical
/// plan, and nothing here touches the filesystem or spawns a process.
/// Directory changes are planned as inline actions that run during the
/// executor's pass.
pub fn build_plan(config: &ScaffoldConfig) -> anyhow::Result<Plan> {
    let app_name = &config.app_name;
    let install = config.package_manager.install_command();

    let mut steps = vec![
        Step::new(
            Label::first("Creating your React app with create-react-app"),
            vec![shell(format!(
                "npx create-react-app {app_name} --typescript"
            ))],
        ),
        Step::new(
            Label::new("Installing linters"),
            vec![
                Action::Inline(Effect::ChangeDir(PathBuf::from(app_name))),
                shell(format!(
                    "{install} -D prettier eslint-config-prettier eslint-plugin-prettier \
                     eslint-plugin-react @typescript-eslint/eslint-plugin @typescript-eslint/parser"
                )),
            ],
        ),
        Step::new(
            Label::new("Configuring linters and pre-commit hooks"),
            vec![
                shell("npx mrm lint-staged"),
                shell(
                    r#"npx json -I -f package.json -e "this[\"lint-staged\"]={'*.{ts,tsx}': ['eslint --fix','git add'], '*.{scss,js,md,json}': ['prettier --write','git add']}""#,
                ),
                shell(format!(
                    "printf {} >> ./.eslintrc.json",
                    boilerplate::shell_stringify(boilerplate::ESLINTRC)?
                )),
                shell(
                    r#"npx json -I -f ./package.json -e "this.scripts.lint=\"tsc --noEmit && eslint '*/**/*.{js,ts,tsx}' --quiet --fix\"""#,
                ),
            ],
        ),
        vscode_settings_step(config.package_manager)?,
        Step::new(
            Label::new("Add Jest & Enzyme"),
            vec![
                shell(format!(
                    "{install} -D @types/jest ts-jest @types/enzyme enzyme-to-json \
                     enzyme-adapter-react-16 @types/enzyme-adapter-react-16"
                )),
                shell(format!(
                    "printf \"{}\" >> jest.config.js",
                    boilerplate::escape_quotes(boilerplate::JEST_CONFIG)
                )),
                shell(format!(
                    "printf \"{}\" >> src/setupEnzyme.ts",
                    boilerplate::escape_quotes(boilerplate::ENZYME_SETUP)
                )),
            ],
        ),
        cleanup_step(config.package_manager),
    ];

    if config.commitizen {
        steps.push(Step::new(
            Label::new("Add commitizen"),
            vec![
                shell(format!("{install} -D commitizen")),
                shell("npx commitizen init cz-conventional-changelog --save-dev --save-exact"),
                shell(r#"npx json -I -f ./package.json -e "this.scripts.commit=\"git-cz\"""#),
            ],
        ));
    }

    steps.push(Step::new(
        Label::new("Creating initial commits"),
        vec![shell("git add ."), shell("git commit -m \"initial setup\"")],
    ));

    Ok(Plan { steps })
}

fn vscode_settings_step(manager: PackageManager) -> anyhow::Result<Step> {
    let mut actions = vec![
        shell("mkdir .vscode"),
        shell(format!(
            "printf {} >> ./.vscode/settings.json",
            boilerplate::shell_stringify(boilerplate::VSCODE_SETTINGS)?
        )),
    ];

    // The fragment defaults to yarn; point the eslint integration at npm
    // when that manager was chosen.
    if manager == PackageManager::Npm {
        actions.push(shell(
            r#"npx json -I -f ./.vscode/settings.json -e "this.eslint.packageManager=\"npm\"""#,
        ));
    }

    Ok(Step::new(
        Label::new("Adding VSCode workspace settings"),
        actions,
    ))
}

fn cleanup_step(manager: PackageManager) -> Step {
    // The plan is built before any step has run, so lock-file existence
    // cannot be consulted here; `rm -f` tolerates an absent file.
    Step::new(
        Label::new("Cleaning up"),
        vec![
            shell(format!("rm -f {}", manager.lock_file_to_remove())),
            shell(manager.install_all_command()),
        ],
    )
}
