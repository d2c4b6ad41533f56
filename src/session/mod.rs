// Session module - PRESENTATION
// In-process screens and the navigation controller that switches between them

mod console;
mod navigator;

pub use console::ConsoleSession;
pub use navigator::{Navigator, Screen};
