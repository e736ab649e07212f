use waypoints::config::Config;
use waypoints::engine::Engine;
use waypoints::error::Error;
use waypoints::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let engine = Engine::from_config(&config).await?;

    serve(engine, config.addr).await
}
