#[tokio::main]
async fn main() -> anyhow::Result<()> {
    studygen_server::start().await
}
