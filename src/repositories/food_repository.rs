use async_trait::async_trait;
use aws_sdk_dynamodb::operation::RequestId;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::sync::Arc;
use tracing::{error, info, instrument, warn, Instrument};

use super::dynamodb::{
    create_dynamodb_span, map_dynamodb_error, optional_decimal, optional_string, put_decimal,
    required_string, Item,
};
use crate::models::{Food, RepositoryResult};

/// Trait defining the interface for food data access operations
#[async_trait]
pub trait FoodRepository: Send + Sync {
    /// Find a food by its ID
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Food>>;

    /// Find every food of an outlet (empty when none match)
    async fn find_by_outlet(&self, outlet_id: &str) -> RepositoryResult<Vec<Food>>;

    /// Find all foods
    async fn find_all(&self) -> RepositoryResult<Vec<Food>>;

    /// Insert or replace a food by identity
    async fn save(&self, food: Food) -> RepositoryResult<Food>;

    async fn delete(&self, food: &Food) -> RepositoryResult<()>;
}

/// DynamoDB implementation of the FoodRepository trait
pub struct DynamoDbFoodRepository {
    client: Arc<DynamoDbClient>,
    table_name: String,
    outlet_index: String,
    region: String,
}

impl DynamoDbFoodRepository {
    /// Create a new DynamoDB food repository
    pub fn new(client: Arc<DynamoDbClient>, table_name: String, region: String) -> Self {
        Self {
            client,
            table_name,
            outlet_index: OUTLET_INDEX.to_string(),
            region,
        }
    }

    /// Get the table name (for testing)
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Convert a Food struct to DynamoDB attribute values
    pub fn food_to_item(&self, food: &Food) -> Item {
        let mut item = Item::new();

        item.insert("id".to_string(), AttributeValue::S(food.id.clone()));
        // Empty strings are not valid index keys; such foods stay out of OutletIndex
        if !food.outlet_id.is_empty() {
            item.insert(
                "outlet_id".to_string(),
                AttributeValue::S(food.outlet_id.clone()),
            );
        }
        item.insert("name".to_string(), AttributeValue::S(food.name.clone()));
        item.insert(
            "description".to_string(),
            AttributeValue::S(food.description.clone()),
        );
        put_decimal(&mut item, "price", food.price);

        item
    }

    /// Convert DynamoDB item to Food struct
    pub fn item_to_food(&self, item: &Item) -> RepositoryResult<Food> {
        Ok(Food {
            id: required_string(item, "id")?,
            outlet_id: optional_string(item, "outlet_id"),
            name: optional_string(item, "name"),
            description: optional_string(item, "description"),
            price: optional_decimal(item, "price")?,
        })
    }

    fn items_to_foods(&self, items: Vec<Item>) -> Vec<Food> {
        items
            .iter()
            .filter_map(|item| match self.item_to_food(item) {
                Ok(food) => Some(food),
                Err(e) => {
                    warn!("Failed to parse food item: {}", e);
                    None
                }
            })
            .collect()
    }
}

/// Name of the GSI keyed on `outlet_id`
pub const OUTLET_INDEX: &str = "OutletIndex";

#[async_trait]
impl FoodRepository for DynamoDbFoodRepository {
    #[instrument(skip(self), fields(table = %self.table_name, id = %id))]
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Food>> {
        info!("Finding food by ID");

        let get_span = create_dynamodb_span("GetItem", &self.table_name, &self.region);

        let response = async {
            let result = self
                .client
                .get_item()
                .table_name(&self.table_name)
                .key("id", AttributeValue::S(id.to_string()))
                .send()
                .await;

            match &result {
                Ok(output) => {
                    if let Some(request_id) = output.request_id() {
                        tracing::Span::current().record("aws.request_id", request_id);
                    }
                }
                Err(e) => {
                    error!("DynamoDB GetItem failed: {}", e);
                }
            }

            result.map_err(|e| map_dynamodb_error(e.into(), &self.table_name))
        }
        .instrument(get_span)
        .await?;

        match response.item {
            Some(item) => {
                let food = self.item_to_food(&item)?;
                info!("Food found");
                Ok(Some(food))
            }
            None => {
                info!("Food not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self), fields(table = %self.table_name, outlet_id = %outlet_id))]
    async fn find_by_outlet(&self, outlet_id: &str) -> RepositoryResult<Vec<Food>> {
        if outlet_id.is_empty() {
            return Ok(Vec::new());
        }

        info!("Finding foods by outlet using GSI");

        let query_span = create_dynamodb_span("Query", &self.table_name, &self.region);

        let items = async {
            let mut items = Vec::new();
            let mut start_key = None;

            loop {
                let output = self
                    .client
                    .query()
                    .table_name(&self.table_name)
                    .index_name(&self.outlet_index)
                    .key_condition_expression("outlet_id = :outlet_id")
                    .expression_attribute_values(
                        ":outlet_id",
                        AttributeValue::S(outlet_id.to_string()),
                    )
                    .set_exclusive_start_key(start_key)
                    .send()
                    .await
                    .map_err(|e| map_dynamodb_error(e.into(), &self.table_name))?;

                items.extend(output.items.unwrap_or_default());

                match output.last_evaluated_key {
                    Some(key) if !key.is_empty() => start_key = Some(key),
                    _ => break,
                }
            }

            Ok::<_, crate::models::RepositoryError>(items)
        }
        .instrument(query_span)
        .await?;

        let foods = self.items_to_foods(items);
        info!("Found {} foods for outlet {}", foods.len(), outlet_id);
        Ok(foods)
    }

    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn find_all(&self) -> RepositoryResult<Vec<Food>> {
        info!("Finding all foods");

        let scan_span = create_dynamodb_span("Scan", &self.table_name, &self.region);

        let items = async {
            let mut items = Vec::new();
            let mut start_key = None;

            loop {
                let output = self
                    .client
                    .scan()
                    .table_name(&self.table_name)
                    .set_exclusive_start_key(start_key)
                    .send()
                    .await
                    .map_err(|e| map_dynamodb_error(e.into(), &self.table_name))?;

                items.extend(output.items.unwrap_or_default());

                match output.last_evaluated_key {
                    Some(key) if !key.is_empty() => start_key = Some(key),
                    _ => break,
                }
            }

            Ok::<_, crate::models::RepositoryError>(items)
        }
        .instrument(scan_span)
        .await?;

        let foods = self.items_to_foods(items);
        info!("Found {} foods", foods.len());
        Ok(foods)
    }

    #[instrument(skip(self, food), fields(table = %self.table_name, id = %food.id))]
    async fn save(&self, food: Food) -> RepositoryResult<Food> {
        info!("Saving food");

        let item = self.food_to_item(&food);
        let put_span = create_dynamodb_span("PutItem", &self.table_name, &self.region);

        async {
            self.client
                .put_item()
                .table_name(&self.table_name)
                .set_item(Some(item))
                .send()
                .await
                .map_err(|e| map_dynamodb_error(e.into(), &self.table_name))
        }
        .instrument(put_span)
        .await?;

        info!("Food saved successfully");
        Ok(food)
    }

    #[instrument(skip(self, food), fields(table = %self.table_name, id = %food.id))]
    async fn delete(&self, food: &Food) -> RepositoryResult<()> {
        info!("Deleting food");

        let delete_span = create_dynamodb_span("DeleteItem", &self.table_name, &self.region);

        async {
            self.client
                .delete_item()
                .table_name(&self.table_name)
                .key("id", AttributeValue::S(food.id.clone()))
                .condition_expression("attribute_exists(id)")
                .send()
                .await
                .map_err(|e| map_dynamodb_error(e.into(), &self.table_name))
        }
        .instrument(delete_span)
        .await?;

        info!("Food deleted successfully");
        Ok(())
    }
}
