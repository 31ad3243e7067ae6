use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotwise_api::config::{ApiConfig, StoreBackend};
use slotwise_core::{
    service::ConsultationService,
    store::{ConsultationStore, memory::InMemoryStore},
};
use slotwise_db::{PgConsultationStore, create_pool, schema::initialize_database};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    slotwise_api::init_tracing(config.log_level)?;

    let store: Arc<dyn ConsultationStore> = match &config.store {
        StoreBackend::Postgres { database_url } => {
            let db_pool = create_pool(database_url).await?;
            initialize_database(&db_pool).await?;
            info!("Connected to PostgreSQL");
            Arc::new(PgConsultationStore::new(db_pool))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store; data is lost on restart");
            Arc::new(InMemoryStore::new())
        }
    };

    let service = ConsultationService::new(store, config.default_duration);
    slotwise_api::start_server(config, service).await?;

    Ok(())
}
