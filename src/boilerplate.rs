//! Configuration fragments embedded into generated files, plus the escaping
//! helpers used to splice them into shell command lines.

use anyhow::Context;

/// Eslint configuration appended to the generated `.eslintrc.json`.
pub const ESLINTRC: &str = include_str!("../boilerplate/eslintrc.json");

/// VSCode workspace settings written to `.vscode/settings.json`.
pub const VSCODE_SETTINGS: &str = include_str!("../boilerplate/settings.json");

/// Jest configuration wired up for ts-jest and enzyme snapshots.
pub const JEST_CONFIG: &str = include_str!("../boilerplate/jest.config.js");

/// Enzyme adapter bootstrap written to `src/setupEnzyme.ts`.
pub const ENZYME_SETUP: &str = include_str!("../boilerplate/setupEnzyme.ts");

/// Backslash-escape single and double quotes so the text survives being
/// wrapped in a double-quoted shell word.
pub fn escape_quotes(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch == '"' || ch == '\'' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Encode a fragment as a single JSON string literal. The result is one
/// shell word: inner quotes arrive escaped and newlines become `\n`
/// sequences that `printf` expands back.
pub fn shell_stringify(input: &str) -> anyhow::Result<String> {
    serde_json::to_string(input).context("encoding boilerplate fragment for shell interpolation")
}
