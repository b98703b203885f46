use rask_log_bridge::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::main().await
}
