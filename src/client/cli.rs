use anyhow::{bail, Context, Result};
use api_explorer::{
    config::Config,
    models::SubmitInput,
    services::{Explorer, ExplorerBoundary},
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;

    let mut args = std::env::args().skip(1);
    let Some(endpoint) = args.next() else {
        bail!("Usage: explorer-cli \"METHOD /path\" [JSON body]");
    };
    let body = args.next().unwrap_or_default();

    let explorer = Explorer::from_config(&config)?;
    if !explorer.has_api_key().await {
        bail!("API_KEY required");
    }

    println!("API Explorer");
    println!("============");
    println!("Server: {}", explorer.base_url());
    println!("Request: {}", endpoint);
    println!();

    let outcome = explorer
        .submit_request(SubmitInput { endpoint, body })
        .await
        .context("Request not sent")?;

    println!("{}  {}ms", outcome.view.status_text, outcome.view.response_time_ms);
    println!("{}", outcome.view.body);

    if let Some(stats) = outcome.stats {
        println!();
        println!("{}", stats);
    }

    Ok(())
}
