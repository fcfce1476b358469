use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use simple_bank::cli::{
    handle_account_command, handle_customer_command, handle_log_command, handle_statement,
    handle_transaction, AccountCommands, CustomerCommands,
};
use simple_bank::config::{paths::BankPaths, settings::Settings};
use simple_bank::menu::Menu;
use simple_bank::models::TransactionKind;
use simple_bank::services::BankService;
use simple_bank::storage::Storage;

#[derive(Parser)]
#[command(
    name = "bank",
    version,
    about = "Console simulation of basic retail-banking operations",
    long_about = "Simple Bank registers customers, opens checking accounts and \
                  records deposits and withdrawals, enforcing per-withdrawal and \
                  daily withdrawal limits. Run without a subcommand for the \
                  interactive menu."
)]
struct Cli {
    /// Disable colors and screen clearing in the menu
    #[arg(long, global = true)]
    no_color: bool,

    /// Directory holding settings, data files and the activity log
    #[arg(long, global = true, env = "SIMPLE_BANK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// Customer management commands
    #[command(subcommand)]
    Customer(CustomerCommands),

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Deposit into a customer's first account
    Deposit {
        /// Customer tax id
        tax_id: String,
        /// Amount (e.g., "150", "150.00" or "150,00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Withdraw from a customer's first account
    Withdraw {
        /// Customer tax id
        tax_id: String,
        /// Amount (e.g., "150", "150.00" or "150,00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Show the statement of a customer's first account
    Statement {
        /// Customer tax id
        tax_id: String,
    },

    /// Show recent activity log entries
    Log {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => BankPaths::with_base_dir(dir),
        None => BankPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;
    let mut service = BankService::load(&storage, &settings)?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let color = settings.color && !cli.no_color;
            let stdin = io::stdin();
            let mut menu = Menu::with_color(service, stdin.lock(), io::stdout(), color);
            menu.run()?;
        }
        Commands::Customer(cmd) => {
            handle_customer_command(&mut service, cmd)?;
        }
        Commands::Account(cmd) => {
            handle_account_command(&mut service, cmd)?;
        }
        Commands::Deposit { tax_id, amount } => {
            handle_transaction(&mut service, TransactionKind::Deposit, &tax_id, &amount)?;
        }
        Commands::Withdraw { tax_id, amount } => {
            handle_transaction(&mut service, TransactionKind::Withdrawal, &tax_id, &amount)?;
        }
        Commands::Statement { tax_id } => {
            handle_statement(&service, &tax_id)?;
        }
        Commands::Log { limit } => {
            handle_log_command(&storage, limit)?;
        }
        Commands::Config => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }

            println!("Simple Bank Configuration");
            println!("=========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Activity log:     {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Date format:          {}", settings.date_format);
            println!("  Colors:               {}", settings.color);
            println!(
                "  Per-withdrawal limit: {}",
                settings.format_money(settings.checking.per_operation_limit)
            );
            println!("  Withdrawals per day:  {}", settings.checking.daily_withdrawal_limit);
            println!("  Saved customers:      {}", service.customers().len());
            println!("  Data initialized:     {}", storage.is_initialized());
        }
    }

    Ok(())
}
