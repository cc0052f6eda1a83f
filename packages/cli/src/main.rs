#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    workforce_cli::run_server().await
}
