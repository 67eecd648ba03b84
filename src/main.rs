use clap::Parser;
use sqlcup::cli::Cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "sqlcup=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    if let Err(e) = cli.run().and_then(|sql| cli.write(&sql)) {
        eprintln!("sqlcup: {}", e);
        if e.is_bad_argument() {
            eprintln!();
            eprintln!("{}", Cli::usage());
        }
        process::exit(e.exit_code());
    }
}
