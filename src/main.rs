use anyhow::Result;
use donelog::commands::Cli;
use donelog::libs::messages::macros::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    Cli::menu().await
}
