//! `passman list`: show the stored services with their numbers.
//!
//! Numbers always refer to the full sorted list, so `passman copy 3`
//! works the same whether or not a filter was applied.

use console::Term;

use crate::cli::interactive::read_input;
use crate::cli::{output, Cli, Context};
use crate::errors::Result;
use crate::vault::CredentialEntry;

/// Execute the `list` command.
pub fn execute(cli: &Cli, table: bool, filter: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let unlocked = ctx.unlock()?;
    let vault = &unlocked.vault;

    if vault.is_empty() {
        output::empty_vault_hint();
        return Ok(());
    }

    let rows = vault.filter(filter.unwrap_or_default());
    if rows.is_empty() {
        output::info(&format!(
            "No entries match filter '{}'.",
            filter.unwrap_or_default()
        ));
        return Ok(());
    }

    output::info(&format!(
        "Saved entries: showing {} of {} (copy N to copy a password)",
        rows.len(),
        vault.len()
    ));

    let page_size = ctx.settings.list_page_size;
    let paginate = Term::stdout().is_term() && rows.len() > page_size;
    if !paginate {
        print_rows(&rows, table);
        return Ok(());
    }

    let pages: Vec<_> = rows.chunks(page_size).collect();
    for (i, page) in pages.iter().enumerate() {
        print_rows(page, table);
        if i + 1 < pages.len() {
            let answer = read_input("Press Enter for next page (q to quit)", "")?;
            if answer.eq_ignore_ascii_case("q") {
                break;
            }
        }
    }

    Ok(())
}

fn print_rows(rows: &[(usize, &str, &CredentialEntry)], table: bool) {
    if table {
        println!("{}", output::entries_table(rows));
    } else {
        for (number, service, entry) in rows {
            println!("{}", output::entry_line(*number, service, entry));
        }
    }
}
