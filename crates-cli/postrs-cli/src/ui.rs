use console::style;
use std::io::{self, IsTerminal};

pub fn info(message: &str) {
    if io::stdout().is_terminal() {
        println!("{:<8} {}", style("INFO").cyan().bold(), style(message).cyan());
    } else {
        println!("INFO     {message}");
    }
}

pub fn error(message: &str) {
    if io::stderr().is_terminal() {
        eprintln!("{:<8} {}", style("ERROR").red().bold(), style(message).red());
    } else {
        eprintln!("Error: {message}");
    }
}
