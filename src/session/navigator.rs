// Navigator - which screen is showing, and where each one leads

use std::fmt;
use tracing::debug;

/// Screens of the banking shell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Main panel: balance and menu
    Panel,
    Deposit,
    Withdraw,
    Statement,
    /// Terminal state, the session ends
    Exit,
}

impl Screen {
    /// Map a panel menu choice to the screen it opens
    pub fn from_menu_choice(choice: &str) -> Option<Screen> {
        match choice.trim().to_ascii_lowercase().as_str() {
            "1" | "d" | "deposit" => Some(Screen::Deposit),
            "2" | "s" | "statement" => Some(Screen::Statement),
            "3" | "w" | "withdraw" => Some(Screen::Withdraw),
            "0" | "q" | "quit" | "exit" => Some(Screen::Exit),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Panel => "Account",
            Screen::Deposit => "How much do you want to deposit?",
            Screen::Withdraw => "How much do you want to withdraw?",
            Screen::Statement => "Statement",
            Screen::Exit => "Goodbye",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Panel => "panel",
            Screen::Deposit => "deposit",
            Screen::Withdraw => "withdraw",
            Screen::Statement => "statement",
            Screen::Exit => "exit",
        };
        f.write_str(name)
    }
}

/// Navigation controller
///
/// Every sub-screen is reached from the panel and goes back to it; going
/// back from the panel ends the session. Once exited, the navigator stays
/// exited.
#[derive(Clone, Debug)]
pub struct Navigator {
    current: Screen,
    transitions: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start on the panel
    pub fn new() -> Self {
        Self {
            current: Screen::Panel,
            transitions: 0,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.current != Screen::Exit
    }

    /// Number of screen changes so far
    pub fn transitions(&self) -> usize {
        self.transitions
    }

    /// Show another screen
    pub fn open(&mut self, screen: Screen) {
        self.go(screen);
    }

    /// Leave the current screen: sub-screens return to the panel, the
    /// panel exits
    pub fn back(&mut self) {
        let target = match self.current {
            Screen::Panel | Screen::Exit => Screen::Exit,
            Screen::Deposit | Screen::Withdraw | Screen::Statement => Screen::Panel,
        };
        self.go(target);
    }

    /// End the session from any screen
    pub fn exit(&mut self) {
        self.go(Screen::Exit);
    }

    fn go(&mut self, screen: Screen) {
        if self.current == Screen::Exit || self.current == screen {
            return;
        }
        debug!(from = %self.current, to = %screen, "navigate");
        self.current = screen;
        self.transitions += 1;
    }
}
