//! GPP observation fetcher.
//!
//! Fetches one observation and prints it as JSON on stdout.
//!
//! # Usage
//!
//! ```bash
//! # Configuration from a TOML file
//! gpp-fetch o-123 --config gpp.toml
//!
//! # Configuration from the environment
//! GPP_API_URL=https://gpp.example.org/odb GPP_API_KEY=... \
//!   GPP_SCHEMA_PATH=schema.graphql gpp-fetch o-123
//! ```
//!
//! # Environment Variables
//!
//! - `GPP_API_URL`, `GPP_API_KEY`, `GPP_SCHEMA_PATH`: used when `--config`
//!   is not given
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gpp_client::schema::{ObservationSchema, Schema};
use gpp_client::{ClientConfig, GppClient};

const USAGE: &str = "usage: gpp-fetch <OBSERVATION_ID> [--config <PATH>]";

struct Args {
    observation_id: String,
    config: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut observation_id = None;
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "--help" | "-h" => bail!(USAGE),
            flag if flag.starts_with('-') => bail!("unknown option '{}'\n{}", flag, USAGE),
            _ if observation_id.is_some() => bail!("unexpected argument '{}'\n{}", arg, USAGE),
            _ => observation_id = Some(arg),
        }
    }

    Ok(Args {
        observation_id: observation_id.context(USAGE)?,
        config,
    })
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the JSON document.
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = parse_args(env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ClientConfig::from_env().context("loading configuration from environment")?,
    };

    let client = GppClient::new(&config)?;
    let observation = client
        .get_observation(&args.observation_id)
        .with_context(|| format!("fetching observation {}", args.observation_id))?;
    info!(observation_id = %observation.observation_id, "Done");

    let json = ObservationSchema.dump(&observation)?;
    println!("{}", serde_json::to_string_pretty(&json)?);

    Ok(())
}
