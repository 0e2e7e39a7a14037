// bistro/app/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use bistro_app::config::AppConfig;
use bistro_app::web::configure_app_routes;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting bistro server...");

  let app_config = AppConfig::from_env().map_err(|e| {
    tracing::error!(error = %e, "Failed to load application configuration.");
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  let server_address = app_config.bind_address();

  let app_state = bistro_app::build_app_state(app_config).await.map_err(|e| {
    tracing::error!(error = %e, "Failed to initialise the store.");
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
  })?;
  tracing::info!(store = app_state.store.backend_tag(), "Application state ready.");

  let sweeper = app_state.sessions.spawn_idle_sweeper(
    app_state.config.session_sweep_interval(),
    app_state.config.session_idle_timeout(),
  );

  tracing::info!("Attempting to bind server to {}...", server_address);
  let result = HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await;

  sweeper.abort();
  result
}
