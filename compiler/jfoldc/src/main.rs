//! jfold CLI
//!
//! Folds parenthesized literals in a Java source file.

use jfoldc::{fold_file, init_tracing, parse_args, rule_listing, Command, USAGE};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    match command {
        Command::ListRules => print!("{}", rule_listing()),
        Command::Fold(options) => {
            init_tracing(options.verbose);
            if let Err(err) = fold_file(&options) {
                tracing::error!(error = %err, "fold failed");
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    }
}
