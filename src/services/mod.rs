// Services module - business logic layer

pub mod add_on_service;
pub mod food_service;

pub use add_on_service::AddOnService;
pub use food_service::FoodService;
