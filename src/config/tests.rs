use super::*;

fn source(vars: &[(&str, &str)]) -> config::Environment {
    let map: config::Map<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    environment().source(Some(map))
}

fn load(vars: &[(&str, &str)]) -> Config {
    Config {
        server: load_section(source(vars), "server").unwrap(),
        database: load_section(source(vars), "database").unwrap(),
        observability: load_section(source(vars), "observability").unwrap(),
    }
}

#[test]
fn test_config_defaults() {
    let config = load(&[]);

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.request_timeout(), Duration::from_secs(30));
    assert_eq!(config.server.max_request_size, 1024 * 1024);

    assert_eq!(config.database.backend().unwrap(), StorageBackend::DynamoDb);
    assert_eq!(config.database.foods_table_name, "Foods");
    assert_eq!(config.database.add_ons_table_name, "AddOns");
    assert_eq!(config.database.outlets_table_name, "Outlets");
    assert_eq!(config.database.region, "us-west-2");
    assert_eq!(config.database.dynamodb_endpoint, None);
    assert!(!config.database.auto_create_tables);
    assert!(!config.database.validate_outlet_reference);

    assert_eq!(config.observability.service_name, "outlet-food-rs");
    assert_eq!(
        config.observability.service_version,
        env!("CARGO_PKG_VERSION")
    );
    assert_eq!(config.otlp_endpoint(), "");
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.enable_json_logging);

    assert!(config.validate().is_ok());
}

#[test]
fn test_config_from_variables() {
    let config = load(&[
        ("OUTLETFOOD_PORT", "9000"),
        ("OUTLETFOOD_STORAGE_BACKEND", "memory"),
        ("OUTLETFOOD_FOODS_TABLE_NAME", "TestFoods"),
        ("OUTLETFOOD_DYNAMODB_ENDPOINT", "http://localhost:8000"),
        ("OUTLETFOOD_AUTO_CREATE_TABLES", "true"),
        ("OUTLETFOOD_VALIDATE_OUTLET_REFERENCE", "true"),
        ("OUTLETFOOD_OTLP_ENDPOINT", "http://collector:4317"),
        ("OUTLETFOOD_LOG_LEVEL", "debug"),
    ]);

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.database.backend().unwrap(), StorageBackend::Memory);
    assert_eq!(config.database.foods_table_name, "TestFoods");
    assert_eq!(
        config.database.dynamodb_endpoint.as_deref(),
        Some("http://localhost:8000")
    );
    assert!(config.database.auto_create_tables);
    assert!(config.database.validate_outlet_reference);
    assert_eq!(config.otlp_endpoint(), "http://collector:4317");
    assert_eq!(config.observability.log_level, "debug");
}

#[test]
fn test_validation_rejects_zero_port() {
    let mut config = load(&[]);
    config.server.port = 0;

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_validation_rejects_empty_table_name() {
    let mut config = load(&[]);
    config.database.add_ons_table_name = String::new();

    let error = config.validate().unwrap_err();
    assert_eq!(
        error.to_string(),
        "Validation error: Add-ons table name cannot be empty"
    );
}

#[test]
fn test_validation_rejects_unknown_backend() {
    let config = load(&[("OUTLETFOOD_STORAGE_BACKEND", "postgres")]);

    assert!(config.validate().is_err());
    assert_eq!(
        "DynamoDB".parse::<StorageBackend>().unwrap(),
        StorageBackend::DynamoDb
    );
}
