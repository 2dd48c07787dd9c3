use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use crate::config::{Config, DatabaseConfig, ServerConfig, StorageBackend};
use crate::handlers::{
    cors_layer, create_add_on_router, create_food_router, health_check, metrics_handler,
    request_validation_middleware, AddOnState, FoodState, ServiceInfo,
};
use crate::models::RepositoryResult;
use crate::observability::{observability_middleware, Metrics};
use crate::repositories::{
    AddOnRepository, DynamoDbAddOnRepository, DynamoDbFoodRepository, DynamoDbOutletRepository,
    FoodRepository, InMemoryAddOnRepository, InMemoryFoodRepository, InMemoryOutletRepository,
    OutletRepository, TableManager,
};
use crate::services::{AddOnService, FoodService};

/// One storage handle per entity, shared by every service
#[derive(Clone)]
pub struct Repositories {
    pub foods: Arc<dyn FoodRepository>,
    pub add_ons: Arc<dyn AddOnRepository>,
    pub outlets: Arc<dyn OutletRepository>,
}

impl Repositories {
    /// Fresh process-local stores
    pub fn in_memory() -> Self {
        Self {
            foods: Arc::new(InMemoryFoodRepository::new()),
            add_ons: Arc::new(InMemoryAddOnRepository::new()),
            outlets: Arc::new(InMemoryOutletRepository::new()),
        }
    }

    /// Open the selected backend, creating DynamoDB tables when asked to
    pub async fn open(
        backend: StorageBackend,
        database: &DatabaseConfig,
    ) -> RepositoryResult<Self> {
        match backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Ok(Self::in_memory())
            }
            StorageBackend::DynamoDb => {
                let client = Arc::new(database.dynamodb_client().await);

                if database.auto_create_tables {
                    TableManager::new(client.clone())
                        .create_all_tables(
                            &database.foods_table_name,
                            &database.add_ons_table_name,
                            &database.outlets_table_name,
                        )
                        .await?;
                }

                info!(
                    "DynamoDB tables: foods={}, add_ons={}, outlets={}",
                    database.foods_table_name,
                    database.add_ons_table_name,
                    database.outlets_table_name
                );

                Ok(Self {
                    foods: Arc::new(DynamoDbFoodRepository::new(
                        client.clone(),
                        database.foods_table_name.clone(),
                        database.region.clone(),
                    )),
                    add_ons: Arc::new(DynamoDbAddOnRepository::new(
                        client.clone(),
                        database.add_ons_table_name.clone(),
                        database.region.clone(),
                    )),
                    outlets: Arc::new(DynamoDbOutletRepository::new(
                        client,
                        database.outlets_table_name.clone(),
                        database.region.clone(),
                    )),
                })
            }
        }
    }
}

/// Services wired over a set of repositories
pub fn create_services(
    repositories: &Repositories,
    validate_outlet_reference: bool,
) -> (Arc<FoodService>, Arc<AddOnService>) {
    let food_service = FoodService::new(
        repositories.foods.clone(),
        repositories.add_ons.clone(),
        repositories.outlets.clone(),
    )
    .with_outlet_validation(validate_outlet_reference);
    let add_on_service = AddOnService::new(repositories.foods.clone(), repositories.add_ons.clone());

    (Arc::new(food_service), Arc::new(add_on_service))
}

/// Build the full router from loaded configuration and repositories
pub fn build_app(config: &Config, repositories: &Repositories, metrics: Arc<Metrics>) -> Router {
    let (food_service, add_on_service) =
        create_services(repositories, config.database.validate_outlet_reference);

    create_app(
        metrics,
        food_service,
        add_on_service,
        &config.server,
        ServiceInfo {
            name: config.observability.service_name.clone(),
            version: config.observability.service_version.clone(),
        },
    )
}

pub fn create_app(
    metrics: Arc<Metrics>,
    food_service: Arc<FoodService>,
    add_on_service: Arc<AddOnService>,
    server: &ServerConfig,
    service_info: ServiceInfo,
) -> Router {
    let metrics_for_middleware = metrics.clone();

    let food_state = FoodState {
        food_service,
        metrics: metrics.clone(),
    };
    let add_on_state = AddOnState {
        add_on_service,
        metrics: metrics.clone(),
    };

    Router::new()
        .route("/health/status", get(health_check))
        .with_state(service_info)
        .merge(
            Router::new()
                .route("/metrics", get(metrics_handler))
                .with_state(metrics),
        )
        .merge(create_food_router(food_state))
        .merge(create_add_on_router(add_on_state))
        .layer(DefaultBodyLimit::max(server.max_request_size))
        .layer(TimeoutLayer::new(server.request_timeout()))
        // Outer to inner: observability, request validation, CORS
        .layer(cors_layer())
        .layer(middleware::from_fn_with_state(
            server.max_request_size,
            request_validation_middleware,
        ))
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
}
