use std::process;

use bizledger::cli::{run_cli, ui::Formatter};

fn main() {
    if let Err(err) = run_cli() {
        let plain = std::env::args().any(|arg| arg == "--plain");
        eprintln!("{}", Formatter::new(plain).error_text(err));
        process::exit(1);
    }
}
