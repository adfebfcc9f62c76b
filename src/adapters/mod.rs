//! UI shell adapters for the terminal.

mod console_ui;

pub use console_ui::ConsoleUi;
