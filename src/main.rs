use checkers_engine::ServerConfig;
use checkers_engine::web::run_server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Checkers Engine - Web Edition");
    println!("=============================");
    println!();

    let config = ServerConfig::from_env()?;
    run_server(config).await?;

    Ok(())
}
