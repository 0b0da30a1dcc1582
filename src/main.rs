use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mojifix::utils::prompt::ConsolePrompter;
use mojifix::{App, Config, RunOutcome};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries the prompts, so diagnostics go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_current_dir().context("failed to resolve working directory")?;
    let mut app = App::new(config, ConsolePrompter::stdio());

    match app.run().context("conversion aborted")? {
        RunOutcome::Declined => tracing::debug!("nothing to do"),
        RunOutcome::Completed(summary) => tracing::info!(?summary, "run complete"),
    }
    Ok(())
}
