use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use registry_token::config::loader;
use registry_token::utils::logging;
use registry_token::utils::logging::LogLevel;
use registry_token::{TokenClient, TokenOptions};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["challenge", "registry"])))]
struct Args {
    /// WWW-Authenticate header value to answer
    #[arg(long, env = "CHALLENGE")]
    challenge: Option<String>,
    /// Registry base URL to probe at /v2/ for a challenge
    #[arg(long, env = "REGISTRY")]
    registry: Option<String>,
    #[arg(long, env = "SCOPE")]
    scope: Option<String>,
    #[arg(short, long, env = "CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read args, load YAML config
    // -------------------------------

    let args = Args::parse();
    let settings = loader::load_settings(args.config.as_deref()).await?;
    logging::run(&settings, args.log_level);

    // -------------------------------
    // 2. Create request client
    // -------------------------------

    let client = TokenClient::from_settings(&settings).context("building HTTP client")?;
    let options = TokenOptions { scope: args.scope };

    // -------------------------------
    // 3. Fetch token
    // -------------------------------

    let response = match (&args.challenge, &args.registry) {
        (Some(challenge), _) => Some(client.request_token(challenge, &options).await?),
        (None, Some(registry)) => client.authenticate(registry, &options).await?,
        (None, None) => unreachable!("clap requires a challenge or a registry"),
    };

    // -------------------------------
    // 4. Print decoded body
    // -------------------------------

    match response {
        Some(response) => {
            info!(status = response.status.as_u16(), "token response received");
            println!("{}", serde_json::to_string_pretty(&response.body)?);
        }
        None => info!("registry requires no authentication"),
    }
    Ok(())
}
