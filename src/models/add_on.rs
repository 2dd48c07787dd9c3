use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional extra belonging to exactly one food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    pub id: String,
    pub food_id: String,
    pub name: String,
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

/// Request model shared by add-on creation, update and the embedded
/// add-on list of a food creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOnRequest {
    /// Overwritten with the path identity on update
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub food_id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnResponse {
    pub id: String,
    pub food_id: String,
    pub name: String,
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

impl AddOn {
    /// Create a new AddOn owned by `food_id` with a freshly generated identity.
    /// Any `food_id` carried by the request is ignored.
    pub fn new(food_id: &str, request: &AddOnRequest) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            food_id: food_id.to_string(),
            name: request.name.clone(),
            description: request.description.clone(),
            price: request.price,
        }
    }

    /// Overwrite food reference, name, description and price
    pub fn replace(&mut self, request: &AddOnRequest) {
        self.food_id = request.food_id.clone();
        self.name = request.name.clone();
        self.description = request.description.clone();
        self.price = request.price;
    }

    pub fn to_response(&self) -> AddOnResponse {
        AddOnResponse {
            id: self.id.clone(),
            food_id: self.food_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
        }
    }
}
