use hostfacts::{config, display};
use std::io;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hostfacts=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run() -> hostfacts::Result<()> {
    let config = config::load_config()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let table = hostfacts::run(&config, &mut out)?;
    display::print_summary(&mut out, &table)?;
    Ok(())
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}
