// ConsoleSession - the banking shell over a line-oriented terminal

use crate::ledger::{Amount, Clock};
use crate::rules::{RulesError, TransactionEngine};
use crate::session::{Navigator, Screen};
use crate::statement::Statement;
use crate::storage::LedgerStore;
use std::io::{self, BufRead, Write};

/// Interactive session driving a transaction engine
///
/// Reads commands line by line from `input` and writes screens to
/// `output`. End of input ends the session from any screen.
pub struct ConsoleSession<'a, S: LedgerStore, C: Clock, R: BufRead, W: Write> {
    engine: &'a mut TransactionEngine<S, C>,
    navigator: Navigator,
    input: R,
    output: W,
}

impl<'a, S: LedgerStore, C: Clock, R: BufRead, W: Write> ConsoleSession<'a, S, C, R, W> {
    pub fn new(engine: &'a mut TransactionEngine<S, C>, input: R, output: W) -> Self {
        Self {
            engine,
            navigator: Navigator::new(),
            input,
            output,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        while self.navigator.is_running() {
            match self.navigator.current() {
                Screen::Panel => self.panel()?,
                Screen::Deposit | Screen::Withdraw => self.amount_screen()?,
                Screen::Statement => self.statement()?,
                Screen::Exit => break,
            }
        }
        writeln!(self.output, "{}", Screen::Exit.title())?;
        self.output.flush()
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    fn panel(&mut self) -> io::Result<()> {
        writeln!(self.output, "== {} ==", Screen::Panel.title())?;
        writeln!(self.output, "Balance: {}", self.engine.balance().to_currency_string())?;
        writeln!(self.output, "[1] Deposit  [2] Statement  [3] Withdraw  [0] Exit")?;

        let Some(line) = self.prompt("> ")? else {
            self.navigator.exit();
            return Ok(());
        };

        match Screen::from_menu_choice(&line) {
            Some(Screen::Exit) => self.navigator.exit(),
            Some(screen) => self.navigator.open(screen),
            None => writeln!(self.output, "Unknown option: {}", line.trim())?,
        }
        Ok(())
    }

    /// Deposit and withdrawal screens: read amounts until `<` or empty line
    fn amount_screen(&mut self) -> io::Result<()> {
        let screen = self.navigator.current();
        writeln!(self.output, "== {} ==", screen.title())?;
        writeln!(self.output, "Balance: {}", self.engine.balance().to_currency_string())?;
        if screen == Screen::Withdraw {
            writeln!(
                self.output,
                "Withdrawals left today: {}",
                self.engine.withdrawals_remaining_today()
            )?;
        }

        loop {
            let Some(line) = self.prompt("Amount (< to go back): ")? else {
                self.navigator.exit();
                return Ok(());
            };
            let line = line.trim();
            if line.is_empty() || line == "<" {
                self.navigator.back();
                return Ok(());
            }

            let outcome = line
                .parse::<Amount>()
                .map_err(RulesError::from)
                .and_then(|amount| match screen {
                    Screen::Withdraw => self.engine.withdraw(amount),
                    _ => self.engine.deposit(amount),
                });

            match outcome {
                Ok(receipt) => writeln!(
                    self.output,
                    "Done. Balance: {}",
                    receipt.balance().to_currency_string()
                )?,
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn statement(&mut self) -> io::Result<()> {
        writeln!(self.output, "== {} ==", Screen::Statement.title())?;
        let statement = Statement::from_ledger(&self.engine.ledger());
        write!(self.output, "{}", statement.render())?;

        match self.prompt("Press Enter to go back ")? {
            Some(_) => self.navigator.back(),
            None => self.navigator.exit(),
        }
        Ok(())
    }

    /// Print a prompt and read one line; `None` at end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
