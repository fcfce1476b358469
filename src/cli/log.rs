//! Activity log CLI command

use crate::error::BankResult;
use crate::storage::Storage;

/// Print the most recent activity log entries, oldest first
pub fn handle_log_command(storage: &Storage, limit: usize) -> BankResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No activity recorded.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    let total = storage.audit().entry_count()?;
    if total > entries.len() {
        println!();
        println!("Showing {} of {} entries.", entries.len(), total);
    }

    Ok(())
}
