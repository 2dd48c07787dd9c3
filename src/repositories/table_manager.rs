use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, KeySchemaElement, KeyType, Projection,
    ProjectionType, ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use super::add_on_repository::FOOD_INDEX;
use super::dynamodb::map_dynamodb_error;
use super::food_repository::OUTLET_INDEX;
use crate::models::{RepositoryError, RepositoryResult};

/// Manages DynamoDB table creation and configuration
pub struct TableManager {
    client: Arc<DynamoDbClient>,
}

/// String attribute definition
fn string_attribute(name: &str) -> RepositoryResult<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(name)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| RepositoryError::AwsSdk {
            message: format!("Failed to build attribute definition: {}", e),
        })
}

fn hash_key(name: &str) -> RepositoryResult<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| RepositoryError::AwsSdk {
            message: format!("Failed to build key schema: {}", e),
        })
}

/// GSI hashed on a single attribute projecting every attribute
fn secondary_index(index_name: &str, attribute: &str) -> RepositoryResult<GlobalSecondaryIndex> {
    GlobalSecondaryIndex::builder()
        .index_name(index_name)
        .key_schema(hash_key(attribute)?)
        .projection(
            Projection::builder()
                .projection_type(ProjectionType::All)
                .build(),
        )
        .build()
        .map_err(|e| RepositoryError::AwsSdk {
            message: format!("Failed to build GSI: {}", e),
        })
}

impl TableManager {
    pub fn new(client: Arc<DynamoDbClient>) -> Self {
        Self { client }
    }

    /// Create the foods table with its outlet GSI
    #[instrument(skip(self), fields(table_name = %table_name))]
    pub async fn create_foods_table(&self, table_name: &str) -> RepositoryResult<()> {
        self.create_table(table_name, Some(("outlet_id", OUTLET_INDEX)))
            .await
    }

    /// Create the add-ons table with its food GSI
    #[instrument(skip(self), fields(table_name = %table_name))]
    pub async fn create_add_ons_table(&self, table_name: &str) -> RepositoryResult<()> {
        self.create_table(table_name, Some(("food_id", FOOD_INDEX)))
            .await
    }

    #[instrument(skip(self), fields(table_name = %table_name))]
    pub async fn create_outlets_table(&self, table_name: &str) -> RepositoryResult<()> {
        self.create_table(table_name, None).await
    }

    async fn create_table(
        &self,
        table_name: &str,
        index: Option<(&str, &str)>,
    ) -> RepositoryResult<()> {
        if self.table_exists(table_name).await? {
            info!("Table {} already exists", table_name);
            return Ok(());
        }

        info!("Creating table {}", table_name);

        let mut attribute_definitions = vec![string_attribute("id")?];
        let mut request = self
            .client
            .create_table()
            .table_name(table_name)
            .key_schema(hash_key("id")?)
            .billing_mode(BillingMode::PayPerRequest);

        if let Some((attribute, index_name)) = index {
            attribute_definitions.push(string_attribute(attribute)?);
            request = request.global_secondary_indexes(secondary_index(index_name, attribute)?);
        }

        request
            .set_attribute_definitions(Some(attribute_definitions))
            .send()
            .await
            .map_err(|e| map_dynamodb_error(e.into(), table_name))?;

        info!("Table creation initiated, waiting for table to become active");
        self.wait_for_table_active(table_name).await?;
        info!("Table {} created successfully", table_name);

        Ok(())
    }

    /// Check if a table exists
    #[instrument(skip(self), fields(table_name = %table_name))]
    pub async fn table_exists(&self, table_name: &str) -> RepositoryResult<bool> {
        match self
            .client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let error: aws_sdk_dynamodb::Error = e.into();
                if matches!(error, aws_sdk_dynamodb::Error::ResourceNotFoundException(_)) {
                    info!("Table {} does not exist", table_name);
                    Ok(false)
                } else {
                    error!("Error checking table existence: {}", error);
                    Err(RepositoryError::ConnectionFailed)
                }
            }
        }
    }

    #[instrument(skip(self), fields(table_name = %table_name))]
    async fn wait_for_table_active(&self, table_name: &str) -> RepositoryResult<()> {
        let mut attempts = 0;
        let max_attempts = 30; // 5 minutes with 10-second intervals
        let wait_duration = Duration::from_secs(10);

        loop {
            let response = self
                .client
                .describe_table()
                .table_name(table_name)
                .send()
                .await
                .map_err(|e| map_dynamodb_error(e.into(), table_name))?;

            match response.table.and_then(|table| table.table_status) {
                Some(TableStatus::Active) => {
                    info!("Table {} is now active", table_name);
                    return Ok(());
                }
                Some(status) => {
                    info!("Table {} status: {:?}, waiting...", table_name, status);
                }
                None => {
                    warn!("Table {} status unknown, waiting...", table_name);
                }
            }

            attempts += 1;
            if attempts >= max_attempts {
                error!("Timeout waiting for table {} to become active", table_name);
                return Err(RepositoryError::Timeout);
            }

            tokio::time::sleep(wait_duration).await;
        }
    }

    /// Create every table the service reads from
    #[instrument(skip(self))]
    pub async fn create_all_tables(
        &self,
        foods_table: &str,
        add_ons_table: &str,
        outlets_table: &str,
    ) -> RepositoryResult<()> {
        info!("Creating all tables");

        let (foods_result, add_ons_result, outlets_result) = tokio::join!(
            self.create_foods_table(foods_table),
            self.create_add_ons_table(add_ons_table),
            self.create_outlets_table(outlets_table),
        );

        foods_result?;
        add_ons_result?;
        outlets_result?;

        info!("All tables created successfully");
        Ok(())
    }
}
