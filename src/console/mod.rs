pub mod command;
pub mod console;

pub use console::Console;
