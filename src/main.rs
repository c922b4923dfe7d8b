#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quill_cli::run().await
}
