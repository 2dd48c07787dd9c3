use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::sync::Arc;
use tracing::{info, instrument, warn, Instrument};

use super::dynamodb::{
    create_dynamodb_span, map_dynamodb_error, optional_string, required_string, Item,
};
use crate::models::{Outlet, RepositoryError, RepositoryResult};

#[async_trait]
pub trait OutletRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Outlet>>;

    async fn exists(&self, id: &str) -> RepositoryResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Outlet>>;

    async fn save(&self, outlet: Outlet) -> RepositoryResult<Outlet>;

    async fn delete(&self, outlet: &Outlet) -> RepositoryResult<()>;
}

pub struct DynamoDbOutletRepository {
    client: Arc<DynamoDbClient>,
    table_name: String,
    region: String,
}

impl DynamoDbOutletRepository {
    pub fn new(client: Arc<DynamoDbClient>, table_name: String, region: String) -> Self {
        Self {
            client,
            table_name,
            region,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn outlet_to_item(&self, outlet: &Outlet) -> Item {
        let mut item = Item::new();
        item.insert("id".to_string(), AttributeValue::S(outlet.id.clone()));
        item.insert("name".to_string(), AttributeValue::S(outlet.name.clone()));
        item
    }

    pub fn item_to_outlet(&self, item: &Item) -> RepositoryResult<Outlet> {
        Ok(Outlet {
            id: required_string(item, "id")?,
            name: optional_string(item, "name"),
        })
    }
}

#[async_trait]
impl OutletRepository for DynamoDbOutletRepository {
    #[instrument(skip(self), fields(table = %self.table_name, id = %id))]
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Outlet>> {
        let get_span = create_dynamodb_span("GetItem", &self.table_name, &self.region);

        let response = async {
            self.client
                .get_item()
                .table_name(&self.table_name)
                .key("id", AttributeValue::S(id.to_string()))
                .send()
                .await
                .map_err(|e| map_dynamodb_error(e.into(), &self.table_name))
        }
        .instrument(get_span)
        .await?;

        response
            .item
            .map(|item| self.item_to_outlet(&item))
            .transpose()
    }

    #[instrument(skip(self), fields(table = %self.table_name, id = %id))]
    async fn exists(&self, id: &str) -> RepositoryResult<bool> {
        if id.is_empty() {
            return Ok(false);
        }

        let get_span = create_dynamodb_span("GetItem", &self.table_name, &self.region);

        // Only the key is projected
        let response = async {
            self.client
                .get_item()
                .table_name(&self.table_name)
                .key("id", AttributeValue::S(id.to_string()))
                .projection_expression("id")
                .send()
                .await
                .map_err(|e| map_dynamodb_error(e.into(), &self.table_name))
        }
        .instrument(get_span)
        .await?;

        Ok(response.item.is_some())
    }

    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn find_all(&self) -> RepositoryResult<Vec<Outlet>> {
        info!("Finding all outlets");

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

        Ok(items
            .iter()
            .filter_map(|item| match self.item_to_outlet(item) {
                Ok(outlet) => Some(outlet),
                Err(e) => {
                    warn!("Failed to parse outlet item: {}", e);
                    None
                }
            })
            .collect())
    }

    #[instrument(skip(self, outlet), fields(table = %self.table_name, id = %outlet.id))]
    async fn save(&self, outlet: Outlet) -> RepositoryResult<Outlet> {
        let item = self.outlet_to_item(&outlet);
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

        Ok(outlet)
    }

    #[instrument(skip(self, outlet), fields(table = %self.table_name, id = %outlet.id))]
    async fn delete(&self, outlet: &Outlet) -> RepositoryResult<()> {
        let delete_span = create_dynamodb_span("DeleteItem", &self.table_name, &self.region);

        async {
            self.client
                .delete_item()
                .table_name(&self.table_name)
                .key("id", AttributeValue::S(outlet.id.clone()))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::dynamodb::test_client;

    #[test]
    fn test_outlet_item_conversion() {
        let repo = DynamoDbOutletRepository::new(
            test_client(),
            "test-outlets".to_string(),
            "us-east-1".to_string(),
        );
        let outlet = Outlet {
            id: "O1".to_string(),
            name: "Downtown".to_string(),
        };

        let item = repo.outlet_to_item(&outlet);
        assert_eq!(item.len(), 2);
        assert_eq!(repo.item_to_outlet(&item).unwrap(), outlet);
        assert_eq!(repo.table_name(), "test-outlets");
    }

    #[test]
    fn test_outlet_without_name() {
        let repo = DynamoDbOutletRepository::new(
            test_client(),
            "test-outlets".to_string(),
            "us-east-1".to_string(),
        );
        let mut item = Item::new();
        item.insert("id".to_string(), AttributeValue::S("O2".to_string()));

        let outlet = repo.item_to_outlet(&item).unwrap();
        assert_eq!(outlet.id, "O2");
        assert_eq!(outlet.name, "");
    }

    #[tokio::test]
    async fn test_empty_outlet_id_does_not_exist() {
        let repo = DynamoDbOutletRepository::new(
            test_client(),
            "test-outlets".to_string(),
            "us-east-1".to_string(),
        );

        assert!(!repo.exists("").await.unwrap());
    }
}
