pub mod add_on;
pub mod error;
pub mod food;
pub mod health;
pub mod metrics;
pub mod middleware;

pub use add_on::{create_add_on_router, AddOnState};
pub use error::{service_error_to_response, ApiError};
pub use food::{create_food_router, FoodState};
pub use health::{health_check, ServiceInfo};
pub use metrics::metrics_handler;
pub use middleware::{cors_layer, request_validation_middleware};
