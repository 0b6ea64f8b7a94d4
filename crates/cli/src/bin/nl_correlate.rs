use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    nl_cli::main_entry().await
}
