use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use vbo_merge::config::{Cli, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) resolve settings ─────────────────────────────────────────
    let settings = Settings::load(&cli)?;
    info!(source = %settings.source, output = %settings.output.display(), "configured");

    // ─── 3) merge & write ────────────────────────────────────────────
    let merged = vbo_merge::run::run(&settings)?;

    info!(rows = merged.len(), "all done");
    Ok(())
}
