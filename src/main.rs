use oxibooks_inventory::{
    app::{build_app, AppState},
    config::Config,
    gateway::QBGatewayFactory,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let factory = QBGatewayFactory::new(config.environment, reqwest::Client::new());
    let app = build_app(AppState::new(factory));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    log::info!(
        "Listening on {} against {:?}",
        listener.local_addr()?,
        config.environment
    );

    axum::serve(listener, app).await?;
    Ok(())
}
