//! Account CLI commands
//!
//! Implements CLI commands for opening and listing accounts.

use clap::Subcommand;

use crate::display::format_account_list;
use crate::error::BankResult;
use crate::services::BankService;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Open a checking account for an existing customer
    Open {
        /// Owner's tax id
        tax_id: String,
    },
    /// List every account of every customer
    List,
}

/// Handle an account command
pub fn handle_account_command(service: &mut BankService, cmd: AccountCommands) -> BankResult<()> {
    match cmd {
        AccountCommands::Open { tax_id } => {
            let account = service.open_checking_account(&tax_id)?;
            let policy = account.kind().policy().copied();

            println!("Opened account: {}", account);
            if let Some(policy) = policy {
                let settings = service.settings();
                println!(
                    "  Per-withdrawal limit: {}",
                    settings.format_money(policy.per_operation_limit)
                );
                println!("  Withdrawals per day:  {}", policy.daily_withdrawal_limit);
            }
            service.save()?;
        }

        AccountCommands::List => {
            println!(
                "{}",
                format_account_list(&service.list_accounts(), service.settings()).trim_end()
            );
        }
    }

    Ok(())
}
