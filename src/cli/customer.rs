//! Customer CLI commands
//!
//! Implements CLI commands for the customer roster.

use clap::Subcommand;

use crate::display::format_customer_list;
use crate::error::BankResult;
use crate::services::BankService;

/// Customer subcommands
#[derive(Subcommand)]
pub enum CustomerCommands {
    /// Register a new customer
    Register {
        /// Full name
        name: String,
        /// Tax id, 11 digits ("11122233344" or "111.222.333-44")
        tax_id: String,
    },
    /// List registered customers
    List,
}

/// Handle a customer command
pub fn handle_customer_command(service: &mut BankService, cmd: CustomerCommands) -> BankResult<()> {
    match cmd {
        CustomerCommands::Register { name, tax_id } => {
            let customer = service.register_customer(&name, &tax_id)?;
            println!("Registered customer: {}", customer);
            service.save()?;
        }

        CustomerCommands::List => {
            println!("{}", format_customer_list(service.customers()).trim_end());
        }
    }

    Ok(())
}
