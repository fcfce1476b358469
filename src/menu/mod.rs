//! Interactive console menu
//!
//! A line-driven loop over the bank service. Every money operation targets
//! the customer's first account. Rejected operations are reported and the
//! loop continues; quitting, or reaching the end of input, saves the roster.

mod console;

pub use console::Console;

use std::io::{BufRead, Write};

use crate::display::{format_account_list, format_statement};
use crate::error::{BankError, BankResult};
use crate::models::{Transaction, TransactionKind};
use crate::services::{parse_amount, BankService};

const OPTIONS: [(&str, &str); 7] = [
    ("d", "Deposit"),
    ("w", "Withdraw"),
    ("s", "Statement"),
    ("nc", "New customer"),
    ("na", "New account"),
    ("la", "List accounts"),
    ("q", "Quit"),
];

enum Step {
    Continue,
    Quit,
}

/// The console menu
pub struct Menu<'a, R, W> {
    service: BankService<'a>,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// Create a menu, taking the color preference from the settings
    pub fn new(service: BankService<'a>, input: R, output: W) -> Self {
        let color = service.settings().color;
        Self::with_color(service, input, output, color)
    }

    /// Create a menu with an explicit color preference
    pub fn with_color(service: BankService<'a>, input: R, output: W, color: bool) -> Self {
        Self {
            service,
            console: Console::new(input, output, color),
        }
    }

    /// Run until the operator quits or input ends, then save
    ///
    /// The roster is saved even when the session ends on an error; the
    /// session's error is returned first.
    pub fn run(&mut self) -> BankResult<()> {
        let session = self.session();
        let saved = self.service.save();
        session?;
        saved?;

        self.console.success("Data saved. Goodbye!")?;
        self.console.flush()?;
        Ok(())
    }

    fn session(&mut self) -> BankResult<()> {
        self.console.clear()?;

        loop {
            self.print_options()?;
            let Some(choice) = self.console.prompt("=> ")? else {
                return Ok(());
            };

            if let Step::Quit = self.dispatch(&choice.to_lowercase())? {
                return Ok(());
            }
        }
    }

    /// Give back the service and the output writer
    pub fn into_parts(self) -> (BankService<'a>, W) {
        (self.service, self.console.into_output())
    }

    fn print_options(&mut self) -> BankResult<()> {
        self.console.line("")?;
        self.console.heading("================ SIMPLE BANK ================")?;
        for (key, label) in OPTIONS {
            self.console.line(&format!("{:<4} {}", format!("[{}]", key), label))?;
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> BankResult<Step> {
        let result = match choice {
            "d" => self.money_operation(TransactionKind::Deposit),
            "w" => self.money_operation(TransactionKind::Withdrawal),
            "s" => self.statement(),
            "nc" => self.new_customer(),
            "na" => self.new_account(),
            "la" => self.list_accounts(),
            "q" => Ok(Step::Quit),
            "" => Ok(Step::Continue),
            other => {
                self.console
                    .failure(&format!("Invalid option '{}'. Please choose again.", other))?;
                Ok(Step::Continue)
            }
        };

        let step = match result {
            Err(err) if err.is_rejection() => {
                self.console.failure(&format!("Operation failed: {}", err))?;
                Ok(Step::Continue)
            }
            other => other,
        };

        for warning in self.service.take_warnings() {
            self.console.failure(&format!("Warning: {}", warning))?;
        }
        step
    }

    fn money_operation(&mut self, kind: TransactionKind) -> BankResult<Step> {
        let Some(tax_id) = self.console.prompt("Customer tax id: ")? else {
            return Ok(Step::Quit);
        };

        let customer = self.service.get_customer(&tax_id)?;
        if customer.first_account().is_none() {
            return Err(BankError::NoAccount(customer.tax_id().to_string()));
        }

        let Some(text) = self.console.prompt(&format!("{} amount: ", kind))? else {
            return Ok(Step::Quit);
        };
        let amount = match parse_amount(&text) {
            Ok(amount) => amount,
            Err(_) => {
                self.console.failure(&format!("Invalid amount: '{}'", text))?;
                return Ok(Step::Continue);
            }
        };

        let balance = self
            .service
            .realize(&tax_id, Transaction::new(kind, amount))?
            .balance();

        let settings = self.service.settings();
        let message = format!(
            "{} of {} completed. Balance: {}",
            kind,
            settings.format_money(amount),
            settings.format_money(balance)
        );
        self.console.success(&message)?;
        Ok(Step::Continue)
    }

    fn statement(&mut self) -> BankResult<Step> {
        let Some(tax_id) = self.console.prompt("Customer tax id: ")? else {
            return Ok(Step::Quit);
        };

        let statement = self.service.statement(&tax_id)?;
        let text = format_statement(&statement, self.service.settings());
        self.console.line(text.trim_end())?;
        Ok(Step::Continue)
    }

    fn new_customer(&mut self) -> BankResult<Step> {
        let Some(name) = self.console.prompt("Full name: ")? else {
            return Ok(Step::Quit);
        };
        let Some(tax_id) = self.console.prompt("Tax id (11 digits): ")? else {
            return Ok(Step::Quit);
        };

        let message = format!(
            "Customer {} registered.",
            self.service.register_customer(&name, &tax_id)?
        );
        self.console.success(&message)?;
        Ok(Step::Continue)
    }

    fn new_account(&mut self) -> BankResult<Step> {
        let Some(tax_id) = self.console.prompt("Customer tax id: ")? else {
            return Ok(Step::Quit);
        };

        let message = format!(
            "Account opened: {}",
            self.service.open_checking_account(&tax_id)?
        );
        self.console.success(&message)?;
        Ok(Step::Continue)
    }

    fn list_accounts(&mut self) -> BankResult<Step> {
        let text = format_account_list(&self.service.list_accounts(), self.service.settings());
        self.console.line(text.trim_end())?;
        Ok(Step::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BankPaths;
    use crate::config::Settings;
    use crate::models::Money;
    use crate::storage::Storage;
    use chrono::{DateTime, Local, TimeZone};
    use std::io;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn plain_settings() -> Settings {
        Settings {
            color: false,
            ..Settings::default()
        }
    }

    fn fixed_noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).single().unwrap()
    }

    fn load_service<'a>(storage: &'a Storage, settings: &'a Settings) -> BankService<'a> {
        BankService::load(storage, settings)
            .unwrap()
            .with_clock(fixed_noon)
    }

    /// Accepts output until `marker` has been written, then fails every write
    struct ClosingWriter {
        written: String,
        marker: &'static str,
    }

    impl Write for ClosingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.contains(self.marker) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "output closed"));
            }
            self.written.push_str(&String::from_utf8_lossy(buf));
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn run_script(storage: &Storage, settings: &Settings, script: &str) -> String {
        let service = load_service(storage, settings);
        let mut menu = Menu::new(service, script.as_bytes(), Vec::new());
        menu.run().unwrap();
        let (_, output) = menu.into_parts();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_ana_scenario() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = plain_settings();
        let script = "\
nc
Ana
111.222.333-44
na
11122233344
d
11122233344
2000
w
11122233344
2500
w
11122233344
500
w
11122233344
500,00
w
11122233344
500
w
11122233344
1
s
11122233344
q
";
        let output = run_script(&storage, &settings, script);

        assert!(output.contains("Customer Ana (111.222.333-44) registered."));
        assert!(output.contains("Account opened: Checking 0001/1"));
        assert!(output.contains("Deposit of R$ 2000.00 completed. Balance: R$ 2000.00"));
        assert!(output.contains("Withdrawal exceeds the per-operation limit of R$ 500.00"));
        assert!(output.contains("Balance: R$ 1500.00"));
        assert!(output.contains("Balance: R$ 1000.00"));
        assert!(output.contains("Withdrawal of R$ 500.00 completed. Balance: R$ 500.00"));
        assert!(output.contains("Daily withdrawal limit reached"));
        assert!(output.contains("================ STATEMENT ================"));
        assert!(output.contains("Data saved. Goodbye!"));

        let customers = storage.load_customers().unwrap();
        let account = customers[0].first_account().unwrap();
        assert_eq!(account.balance(), Money::from_units_cents(500, 0));
        assert_eq!(account.history().len(), 4);
        assert_eq!(account.history().withdrawals_on(fixed_noon().date_naive()), 3);
    }

    #[test]
    fn test_output_failure_still_saves() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = plain_settings();
        let output = ClosingWriter {
            written: String::new(),
            marker: "registered.",
        };
        let script = "nc\nAna\n11122233344\nq\n";

        let mut menu = Menu::new(load_service(&storage, &settings), script.as_bytes(), output);
        assert!(matches!(menu.run(), Err(BankError::Io(_))));

        let customers = storage.load_customers().unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name(), "Ana");
    }

    #[test]
    fn test_activity_log_failure_is_a_warning() {
        let (temp_dir, storage) = create_test_storage();
        let settings = plain_settings();
        let mut service = load_service(&storage, &settings);
        service.register_customer("Ana", "11122233344").unwrap();
        service.open_checking_account("11122233344").unwrap();
        service.deposit("11122233344", Money::from_units_cents(100, 0)).unwrap();

        let log = BankPaths::with_base_dir(temp_dir.path().to_path_buf()).audit_log();
        std::fs::remove_file(&log).unwrap();
        std::fs::create_dir(&log).unwrap();

        let script = "d\n11122233344\n50\nq\n";
        let mut menu = Menu::new(service, script.as_bytes(), Vec::new());
        menu.run().unwrap();
        let output = String::from_utf8(menu.into_parts().1).unwrap();

        assert!(output.contains("Deposit of R$ 50.00 completed. Balance: R$ 150.00"));
        assert!(output.contains("Warning: Activity log not updated"));
        assert!(output.contains("Data saved. Goodbye!"));

        let customers = storage.load_customers().unwrap();
        assert_eq!(customers.len(), 1);
        let account = customers[0].first_account().unwrap();
        assert_eq!(account.balance(), Money::from_units_cents(150, 0));
    }

    #[test]
    fn test_end_of_input_saves() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = plain_settings();

        let output = run_script(&storage, &settings, "nc\nAna\n11122233344\n");
        assert!(output.contains("Data saved."));
        assert_eq!(storage.load_customers().unwrap().len(), 1);
    }

    #[test]
    fn test_end_of_input_mid_operation() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = plain_settings();

        let output = run_script(&storage, &settings, "nc\nAna\n");
        assert!(output.contains("Data saved."));
        assert!(storage.load_customers().unwrap().is_empty());
    }

    #[test]
    fn test_lookup_failures() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = plain_settings();
        let script = "\
d
99988877766
nc
Ana
11122233344
w
11122233344
q
";
        let output = run_script(&storage, &settings, script);

        assert!(output.contains("Customer not found: 99988877766"));
        assert!(output.contains("Customer 11122233344 has no account"));
    }

    #[test]
    fn test_invalid_amount_makes_no_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = plain_settings();
        let script = "\
nc
Ana
11122233344
na
11122233344
d
11122233344
lots
d
11122233344
-5
q
";
        let output = run_script(&storage, &settings, script);

        assert!(output.contains("Invalid amount: 'lots'"));
        assert!(output.contains("Operation failed: Invalid amount: -R$ 5.00"));

        let customers = storage.load_customers().unwrap();
        assert!(customers[0].first_account().unwrap().history().is_empty());
    }

    #[test]
    fn test_unknown_option_and_listing() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = plain_settings();
        let script = "\
x
la
nc
Bruno
55566677788
na
55566677788
LA
q
";
        let output = run_script(&storage, &settings, script);

        assert!(output.contains("Invalid option 'x'"));
        assert!(output.contains("No accounts found."));
        assert!(output.contains("Bruno"));
        assert!(output.contains("555.666.777-88"));
    }

    #[test]
    fn test_duplicate_customer_is_reported() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = plain_settings();
        let script = "nc\nAna\n11122233344\nnc\nAna Again\n111.222.333-44\nq\n";

        let output = run_script(&storage, &settings, script);
        assert!(output.contains("Customer already exists: 11122233344"));
        assert_eq!(storage.load_customers().unwrap().len(), 1);
    }
}
