use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use trip_planner_api::config::AppConfig;
use trip_planner_api::db::memory::InMemoryItineraryStore;
use trip_planner_api::db::mongo::{create_mongo_client, MongoItineraryStore};
use trip_planner_api::db::store::ItineraryStore;
use trip_planner_api::routes;
use trip_planner_api::services::ai_client::{ChatCompletionsClient, ResearchProvider, TextGenerator};
use trip_planner_api::services::itinerary_generation_service::ItineraryGenerator;
use trip_planner_api::services::itinerary_service::ItineraryService;

fn io_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io_error)?;

    let store: Arc<dyn ItineraryStore> = match &config.mongodb_uri {
        Some(uri) => {
            let client = create_mongo_client(uri).await.map_err(io_error)?;
            Arc::new(MongoItineraryStore::new(client, &config.mongodb_database))
        }
        None => {
            log::warn!("MONGODB_URI not set, itineraries are kept in memory only");
            Arc::new(InMemoryItineraryStore::new())
        }
    };

    let generator: Option<Arc<dyn TextGenerator>> = match config.generation.clone() {
        Some(provider) => Some(Arc::new(
            ChatCompletionsClient::new(provider, config.ai_timeout, true).map_err(io_error)?,
        )),
        None => {
            log::warn!("OPENAI_API_KEY not set, every itinerary will use the offline generator");
            None
        }
    };

    let research: Option<Arc<dyn ResearchProvider>> = match config.research.clone() {
        Some(provider) => Some(Arc::new(
            ChatCompletionsClient::new(provider, config.ai_timeout, false).map_err(io_error)?,
        )),
        None => {
            log::info!("PERPLEXITY_API_KEY not set, destination research disabled");
            None
        }
    };

    let service = web::Data::new(ItineraryService::new(
        ItineraryGenerator::new(generator, research, config.currency.clone()),
        store,
    ));
    let jwt_secret = config.jwt_secret.clone();

    log::info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(|cfg| routes::configure(cfg, &jwt_secret))
    })
    .bind((config.host.clone(), config.port))?
    .run()
    .await
}
