// Repositories module - data access layer

pub mod add_on_repository;
mod dynamodb;
pub mod food_repository;
pub mod memory;
pub mod outlet_repository;
pub mod table_manager;

pub use add_on_repository::{AddOnRepository, DynamoDbAddOnRepository};
pub use food_repository::{DynamoDbFoodRepository, FoodRepository};
pub use memory::{InMemoryAddOnRepository, InMemoryFoodRepository, InMemoryOutletRepository};
pub use outlet_repository::{DynamoDbOutletRepository, OutletRepository};
pub use table_manager::TableManager;
