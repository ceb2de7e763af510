use clap::Parser;
use regionsort::cli::{setup, Cli};

fn main() {
    let cli = Cli::parse();
    setup::init_logging(cli.verbosity);

    let code = match regionsort::commands::run(cli) {
        Ok(code) => code,
        Err(e) => {
            // Reported, not propagated: the tool always exits normally.
            println!("Error: {:#}", e);
            0
        }
    };

    std::process::exit(code);
}
