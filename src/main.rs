use domain::user;
use events::EventPublisher;
use hub::{Hub, HubDomainEventHandler};
use log::*;
use migration::{Migrator, MigratorTrait};
use service::{config::Config, logging::Logger, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    info!(
        "Starting Tonish API v{} [{}]",
        clap::crate_version!(),
        config.runtime_env()
    );

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(db.as_ref(), None).await {
        error!("Failed to migrate database: {e}");
        std::process::exit(1);
    }

    if let Err(e) = user::seed_default_user(db.as_ref(), &config).await {
        error!("Failed to create the default user: {e}");
        std::process::exit(1);
    }

    let (hub, hub_loop) = Hub::new();
    tokio::spawn(hub_loop.run());

    let event_publisher =
        EventPublisher::new().with_handler(Arc::new(HubDomainEventHandler::new(hub.clone())));

    let app_state = AppState::new(config, &db, Arc::new(event_publisher), hub);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server stopped with an error: {e}");
        std::process::exit(1);
    }

    info!("Server stopped");
}
