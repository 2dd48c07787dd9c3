use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Error as DynamoDbError;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::error;

use crate::models::RepositoryError;

pub(crate) type Item = HashMap<String, AttributeValue>;

/// Create a DynamoDB client span with X-Ray friendly attributes
pub(crate) fn create_dynamodb_span(operation: &str, table_name: &str, region: &str) -> tracing::Span {
    tracing::info_span!(
        "DynamoDB",
        "aws.service" = "DynamoDB",
        "aws.operation" = operation,
        "aws.region" = %region,
        "aws.dynamodb.table_name" = %table_name,
        "aws.request_id" = tracing::field::Empty,
        "aws.remote.service" = "AWS::DynamoDB",
        "aws.remote.operation" = operation,
        "aws.remote.resource.type" = "AWS::DynamoDB::Table",
        "aws.remote.resource.identifier" = %table_name,
        "otel.kind" = "client",
        "otel.name" = format!("DynamoDB.{}", operation),
        "rpc.system" = "aws-api",
        "rpc.service" = "AmazonDynamoDBv2",
        "rpc.method" = operation,
        "db.system" = "dynamodb",
        "db.name" = %table_name,
        "db.operation" = operation,
    )
}

/// Convert a DynamoDB error to RepositoryError
pub(crate) fn map_dynamodb_error(error: DynamoDbError, table_name: &str) -> RepositoryError {
    error!("DynamoDB error: {:?}", error);

    match error {
        DynamoDbError::ResourceNotFoundException(_) => RepositoryError::TableNotFound {
            table_name: table_name.to_string(),
        },
        DynamoDbError::ConditionalCheckFailedException(_) => RepositoryError::NotFound,
        DynamoDbError::ProvisionedThroughputExceededException(_)
        | DynamoDbError::RequestLimitExceeded(_) => RepositoryError::RateLimitExceeded,
        other => RepositoryError::AwsSdk {
            message: other.to_string(),
        },
    }
}

pub(crate) fn required_string(item: &Item, key: &str) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| RepositoryError::InvalidItem {
            message: format!("Missing {}", key),
        })
}

/// Text attributes written as empty strings may have been dropped by older writers
pub(crate) fn optional_string(item: &Item, key: &str) -> String {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .unwrap_or_default()
}

pub(crate) fn optional_decimal(item: &Item, key: &str) -> Result<Option<Decimal>, RepositoryError> {
    match item.get(key) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(value) => value
            .as_n()
            .ok()
            .and_then(|s| Decimal::from_str(s).ok())
            .map(Some)
            .ok_or_else(|| RepositoryError::InvalidItem {
                message: format!("Invalid {}", key),
            }),
    }
}

pub(crate) fn put_decimal(item: &mut Item, key: &str, value: Option<Decimal>) {
    if let Some(value) = value {
        item.insert(key.to_string(), AttributeValue::N(value.to_string()));
    }
}

#[cfg(test)]
pub(crate) fn test_client() -> std::sync::Arc<aws_sdk_dynamodb::Client> {
    let config = aws_sdk_dynamodb::Config::builder()
        .region(aws_sdk_dynamodb::config::Region::new("us-east-1"))
        .behavior_version(aws_sdk_dynamodb::config::BehaviorVersion::latest())
        .build();
    std::sync::Arc::new(aws_sdk_dynamodb::Client::from_conf(config))
}
