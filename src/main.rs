mod api;
mod cli;
mod services;

use cli::cli;
use services::shared::{env::Settings, logger::init_logger};

async fn run_exchangebox() -> anyhow::Result<()> {
    init_logger();
    let settings = Settings::from_env();
    cli(settings).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    run_exchangebox().await?;
    Ok(())
}
