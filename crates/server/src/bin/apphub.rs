use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    apphub_server::main_entry().await
}
