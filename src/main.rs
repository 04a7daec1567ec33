//! NSIGII: trinary echo verification demo

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use nsigii::report::{run_demo, DemoOptions, DEMO_SYMBOLS};
use nsigii_core::{parse_symbols, SystemNoise};
use nsigii_echo::{EchoConfig, EchoServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nsigii", about = "Trinary echo verification demo")]
struct Cli {
    /// Comma-separated symbols (YES, NO, MAYBE). Default: YES,MAYBE,NO,MAYBE
    #[arg(short, long)]
    symbols: Option<String>,

    /// Path to config file (TOML). Default: built-in constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dump default config as TOML and exit
    #[arg(long, default_value_t = false)]
    dump_config: bool,

    /// Sparse-encode the message first so MAYBE entropy adds to the work
    #[arg(long, default_value_t = false)]
    encode: bool,

    /// Emit the report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nsigii=warn,nsigii_core=warn,nsigii_echo=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.dump_config {
        print!("{}", EchoConfig::default().to_toml());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => EchoConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EchoConfig::default(),
    };

    let symbols = match &cli.symbols {
        Some(list) => parse_symbols(list).context("failed to parse --symbols")?,
        None => DEMO_SYMBOLS.to_vec(),
    };

    let server = EchoServer::new(config);
    let options = DemoOptions {
        symbols,
        encode: cli.encode,
    };
    let report = run_demo(&server, &options, &mut SystemNoise::new()).context("demo run failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}
