use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finrules::cli::{Cli, Command, render};
use finrules::config::EngineConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,finrules=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match EngineConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    if let Command::Serve { port } = cli.command {
        info!("finrules v{}", env!("CARGO_PKG_VERSION"));
        if let Err(e) = finrules::api::run_http_server(port, config).await {
            eprintln!("Server error: {e}");
            std::process::exit(1);
        }
        return;
    }

    match render(&config, &cli.command, cli.json) {
        Ok(out) => print!("{out}"),
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}
