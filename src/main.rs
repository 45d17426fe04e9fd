use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    screenplay_cli::cli::app::run().await
}
