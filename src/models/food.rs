use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AddOnRequest, AddOnResponse};

/// Food offered by an outlet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub outlet_id: String,
    pub name: String,
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

/// Request model for creating a food, optionally with its add-ons
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateFoodRequest {
    pub outlet_id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(rename = "addOns", skip_serializing_if = "Option::is_none")]
    pub add_ons: Option<Vec<AddOnRequest>>,
}

/// Request model for replacing every mutable field of a food
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateFoodRequest {
    /// Overwritten with the path identity by the handler
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub outlet_id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodResponse {
    pub id: String,
    pub outlet_id: String,
    pub name: String,
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

/// Response for food creation, carrying the add-ons created alongside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFoodResponse {
    pub id: String,
    pub outlet_id: String,
    pub name: String,
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(rename = "addOns")]
    pub add_ons: Vec<AddOnResponse>,
}

impl Food {
    /// Create a new Food with a freshly generated identity
    pub fn new(request: &CreateFoodRequest) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            outlet_id: request.outlet_id.clone(),
            name: request.name.clone(),
            description: request.description.clone(),
            price: request.price,
        }
    }

    /// Overwrite outlet reference, name, description and price. The identity is kept.
    pub fn replace(&mut self, request: UpdateFoodRequest) {
        self.outlet_id = request.outlet_id;
        self.name = request.name;
        self.description = request.description;
        self.price = request.price;
    }

    pub fn to_response(&self) -> FoodResponse {
        FoodResponse {
            id: self.id.clone(),
            outlet_id: self.outlet_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
        }
    }

    pub fn to_create_response(&self, add_ons: Vec<AddOnResponse>) -> CreateFoodResponse {
        CreateFoodResponse {
            id: self.id.clone(),
            outlet_id: self.outlet_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            add_ons,
        }
    }
}
