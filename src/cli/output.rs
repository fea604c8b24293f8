//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::CredentialEntry;

/// Widest comment shown in `list` before it is cut with an ellipsis.
const COMMENT_WIDTH: usize = 40;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print the hint shown when there is nothing to list.
pub fn empty_vault_hint() {
    info("No services in the vault yet.");
    tip("Run `passman add` to add your first service.");
}

/// Build a table of entries (No, Service, Login, Host, Comment).
///
/// Passwords are never part of the listing.
pub fn entries_table(rows: &[(usize, &str, &CredentialEntry)]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["No", "Service", "Login", "Host", "Comment"]);

    for (number, service, entry) in rows {
        table.add_row(vec![
            number.to_string(),
            (*service).to_string(),
            entry.login().to_string(),
            entry.host().to_string(),
            truncate(entry.comment(), COMMENT_WIDTH),
        ]);
    }

    table
}

/// One compact line per entry: "  3. github (alice @ github.com)".
pub fn entry_line(number: usize, service: &str, entry: &CredentialEntry) -> String {
    let details: Vec<&str> = [entry.login(), entry.host()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

    let mut line = format!("{:>3}. {}", number, style(service).bold());
    if !details.is_empty() {
        line.push_str(&format!(" ({})", details.join(" @ ")));
    }
    if !entry.comment().is_empty() {
        line.push_str(&format!(
            " {}",
            style(format!("# {}", truncate(entry.comment(), COMMENT_WIDTH))).dim()
        ));
    }
    line
}

/// Cut `text` to at most `max` characters, ending in "..." when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
