#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grok_light::run().await
}
