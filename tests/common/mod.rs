use std::sync::Arc;
use std::time::Duration;

use outlet_food_rs::{
    config::ServerConfig, create_app, create_services, handlers::ServiceInfo, Metrics,
    Repositories,
};
use reqwest::Client;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
    pub repositories: Repositories,
}

fn test_server_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_seconds: 5,
        max_request_size: 64 * 1024,
    }
}

impl TestEnvironment {
    pub async fn new() -> Self {
        Self::with_outlet_validation(false).await
    }

    pub async fn with_outlet_validation(validate_outlet_reference: bool) -> Self {
        let repositories = Repositories::in_memory();
        let (food_service, add_on_service) =
            create_services(&repositories, validate_outlet_reference);

        let app = create_app(
            Arc::new(Metrics::new().expect("Failed to create metrics")),
            food_service,
            add_on_service,
            &test_server_config(),
            ServiceInfo {
                name: "outlet-food-test".to_string(),
                version: "0.1.0".to_string(),
            },
        );

        // Start server
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Failed to serve app");
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        Self {
            client: Client::new(),
            base_url,
            repositories,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a food and return the `data` object of the response
    pub async fn create_food(&self, body: Value) -> Value {
        let response = self
            .client
            .post(self.url("/api/foods"))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// POST an add-on and return the `data` object of the response
    pub async fn create_add_on(&self, food_id: &str, name: &str) -> Value {
        let response = self
            .client
            .post(self.url("/api/add-ons"))
            .json(&json!({ "food_id": food_id, "name": name, "price": 1.0 }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}
