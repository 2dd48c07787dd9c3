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
use crate::models::{AddOn, RepositoryError, RepositoryResult};

/// Trait defining the interface for add-on data access operations
#[async_trait]
pub trait AddOnRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<AddOn>>;

    /// Find an add-on by identity, only if it belongs to the given food
    async fn find_by_food_and_id(&self, food_id: &str, id: &str)
        -> RepositoryResult<Option<AddOn>>;

    async fn find_by_food(&self, food_id: &str) -> RepositoryResult<Vec<AddOn>>;

    async fn find_all(&self) -> RepositoryResult<Vec<AddOn>>;

    /// Insert or replace an add-on by identity
    async fn save(&self, add_on: AddOn) -> RepositoryResult<AddOn>;

    async fn delete(&self, add_on: &AddOn) -> RepositoryResult<()>;
}

/// Name of the GSI keyed on `food_id`
pub const FOOD_INDEX: &str = "FoodIndex";

/// DynamoDB implementation of the AddOnRepository trait
pub struct DynamoDbAddOnRepository {
    client: Arc<DynamoDbClient>,
    table_name: String,
    food_index: String,
    region: String,
}

impl DynamoDbAddOnRepository {
    pub fn new(client: Arc<DynamoDbClient>, table_name: String, region: String) -> Self {
        Self {
            client,
            table_name,
            food_index: FOOD_INDEX.to_string(),
            region,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn add_on_to_item(&self, add_on: &AddOn) -> Item {
        let mut item = Item::new();

        item.insert("id".to_string(), AttributeValue::S(add_on.id.clone()));
        item.insert(
            "food_id".to_string(),
            AttributeValue::S(add_on.food_id.clone()),
        );
        item.insert("name".to_string(), AttributeValue::S(add_on.name.clone()));
        item.insert(
            "description".to_string(),
            AttributeValue::S(add_on.description.clone()),
        );
        put_decimal(&mut item, "price", add_on.price);

        item
    }

    pub fn item_to_add_on(&self, item: &Item) -> RepositoryResult<AddOn> {
        Ok(AddOn {
            id: required_string(item, "id")?,
            food_id: required_string(item, "food_id")?,
            name: optional_string(item, "name"),
            description: optional_string(item, "description"),
            price: optional_decimal(item, "price")?,
        })
    }

    fn items_to_add_ons(&self, items: Vec<Item>) -> Vec<AddOn> {
        items
            .iter()
            .filter_map(|item| match self.item_to_add_on(item) {
                Ok(add_on) => Some(add_on),
                Err(e) => {
                    warn!("Failed to parse add-on item: {}", e);
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl AddOnRepository for DynamoDbAddOnRepository {
    #[instrument(skip(self), fields(table = %self.table_name, id = %id))]
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<AddOn>> {
        info!("Finding add-on by ID");

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

        response
            .item
            .map(|item| self.item_to_add_on(&item))
            .transpose()
    }

    #[instrument(skip(self), fields(table = %self.table_name, food_id = %food_id, id = %id))]
    async fn find_by_food_and_id(
        &self,
        food_id: &str,
        id: &str,
    ) -> RepositoryResult<Option<AddOn>> {
        let add_on = self
            .find_by_id(id)
            .await?
            .filter(|add_on| add_on.food_id == food_id);

        if add_on.is_none() {
            info!("No add-on with this ID belongs to the food");
        }
        Ok(add_on)
    }

    #[instrument(skip(self), fields(table = %self.table_name, food_id = %food_id))]
    async fn find_by_food(&self, food_id: &str) -> RepositoryResult<Vec<AddOn>> {
        info!("Finding add-ons by food using GSI");

        let query_span = create_dynamodb_span("Query", &self.table_name, &self.region);

        let items = async {
            let mut items = Vec::new();
            let mut start_key = None;

            loop {
                let output = self
                    .client
                    .query()
                    .table_name(&self.table_name)
                    .index_name(&self.food_index)
                    .key_condition_expression("food_id = :food_id")
                    .expression_attribute_values(":food_id", AttributeValue::S(food_id.to_string()))
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

            Ok::<_, RepositoryError>(items)
        }
        .instrument(query_span)
        .await?;

        let add_ons = self.items_to_add_ons(items);
        info!("Found {} add-ons for food {}", add_ons.len(), food_id);
        Ok(add_ons)
    }

    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn find_all(&self) -> RepositoryResult<Vec<AddOn>> {
        info!("Finding all add-ons");

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

            Ok::<_, RepositoryError>(items)
        }
        .instrument(scan_span)
        .await?;

        Ok(self.items_to_add_ons(items))
    }

    #[instrument(skip(self, add_on), fields(table = %self.table_name, id = %add_on.id))]
    async fn save(&self, add_on: AddOn) -> RepositoryResult<AddOn> {
        info!("Saving add-on");

        let item = self.add_on_to_item(&add_on);
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

        Ok(add_on)
    }

    #[instrument(skip(self, add_on), fields(table = %self.table_name, id = %add_on.id))]
    async fn delete(&self, add_on: &AddOn) -> RepositoryResult<()> {
        info!("Deleting add-on");

        let delete_span = create_dynamodb_span("DeleteItem", &self.table_name, &self.region);

        async {
            self.client
                .delete_item()
                .table_name(&self.table_name)
                .key("id", AttributeValue::S(add_on.id.clone()))
                .condition_expression("attribute_exists(id)")
                .send()
                .await
                .map_err(|e| map_dynamodb_error(e.into(), &self.table_name))
        }
        .instrument(delete_span)
        .await?;

        Ok(())
    }
}
