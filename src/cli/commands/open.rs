//! `passman open`: edit the whole vault as JSON in a text editor.
//!
//! The vault is decrypted to a private temp file, the editor runs on it,
//! and the edited document replaces the vault (re-encrypted with the same
//! password when it was encrypted).

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::cli::{interactive_policy, output, Cli, Context};
use crate::errors::{PassmanError, Result};

const FALLBACK_EDITOR: &str = "vi";

/// Execute the `open` command.
pub fn execute(cli: &Cli, editor: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let editor = find_editor(editor, ctx.settings.editor.as_deref(), |key| {
        std::env::var(key).ok()
    });

    let vault = ctx
        .store
        .edit_with(&interactive_policy(), |path| launch_editor(&editor, path))?;

    output::success(&format!("Vault updated ({} entries).", vault.len()));
    Ok(())
}

/// Pick the editor: argument, then the `editor` setting, then `$VISUAL`,
/// `$EDITOR`, and finally `vi`. Blank values are skipped.
fn find_editor<F>(arg: Option<&str>, setting: Option<&str>, env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let explicit = [arg, setting]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string);

    explicit
        .or_else(|| {
            ["VISUAL", "EDITOR"]
                .into_iter()
                .filter_map(|key| env(key))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        })
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

/// Run `editor` (which may carry its own arguments, e.g. `code --wait`)
/// on `path` and wait for it to exit.
fn launch_editor(editor: &str, path: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| PassmanError::EditorError("no editor configured".into()))?;

    debug!(editor = program, "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| PassmanError::EditorError(format!("failed to launch '{editor}': {e}")))?;

    if !status.success() {
        return Err(PassmanError::EditorError(match status.code() {
            Some(code) => format!("editor exited with code {code}"),
            None => "editor was terminated by a signal".into(),
        }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn argument_wins() {
        let editor = find_editor(Some("nano"), Some("vim"), |_| Some("emacs".into()));
        assert_eq!(editor, "nano");
    }

    #[test]
    fn setting_beats_environment() {
        let editor = find_editor(None, Some("vim"), |_| Some("emacs".into()));
        assert_eq!(editor, "vim");
    }

    #[test]
    fn visual_beats_editor() {
        let editor = find_editor(None, None, |key| match key {
            "VISUAL" => Some("code --wait".into()),
            "EDITOR" => Some("nano".into()),
            _ => None,
        });
        assert_eq!(editor, "code --wait");
    }

    #[test]
    fn blank_values_are_skipped() {
        let editor = find_editor(Some("  "), None, |key| match key {
            "VISUAL" => Some(String::new()),
            "EDITOR" => Some("nano".into()),
            _ => None,
        });
        assert_eq!(editor, "nano");
    }

    #[test]
    fn falls_back_to_vi() {
        assert_eq!(find_editor(None, None, no_env), "vi");
    }

    #[cfg(unix)]
    #[test]
    fn launch_reports_failing_editor() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let result = launch_editor("false", tmp.path());
        assert!(matches!(result, Err(PassmanError::EditorError(_))));
    }

    #[cfg(unix)]
    #[test]
    fn launch_passes_extra_arguments() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        launch_editor("touch -c", tmp.path()).unwrap();
    }

    #[test]
    fn launch_reports_missing_program() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let result = launch_editor("passman-no-such-editor-xyz", tmp.path());
        assert!(matches!(result, Err(PassmanError::EditorError(_))));
    }
}
