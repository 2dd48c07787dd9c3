use axum::{
    extract::{Path, State},
    response::Json,
    routing::{post, put},
    Router,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::error::{service_error_to_response, ApiError};
use crate::models::{AddOnRequest, AddOnResponse, WebResponse, DELETED};
use crate::observability::Metrics;
use crate::services::AddOnService;

const ENTITY: &str = "add_on";

#[derive(Clone)]
pub struct AddOnState {
    pub add_on_service: Arc<AddOnService>,
    pub metrics: Arc<Metrics>,
}

pub fn create_add_on_router(state: AddOnState) -> Router {
    Router::new()
        .route("/api/add-ons", post(create_add_on))
        .route(
            "/api/add-ons/:add_on_id",
            put(update_add_on).delete(remove_add_on),
        )
        .with_state(state)
}

#[instrument(name = "create_add_on", skip(state, request), fields(food_id = %request.food_id))]
pub async fn create_add_on(
    State(state): State<AddOnState>,
    Json(request): Json<AddOnRequest>,
) -> Result<Json<WebResponse<AddOnResponse>>, ApiError> {
    info!("Received request to create add-on for food: {}", request.food_id);

    let result = state.add_on_service.create(request).await;
    state
        .metrics
        .record_entity_operation(ENTITY, "create", result.is_ok());

    match result {
        Ok(add_on) => {
            info!("Successfully created add-on with ID: {}", add_on.id);
            Ok(Json(WebResponse::new(add_on)))
        }
        Err(err) => {
            error!("Failed to create add-on: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

#[instrument(name = "update_add_on", skip(state, request), fields(
    add_on_id = %add_on_id,
    food_id = %request.food_id,
))]
pub async fn update_add_on(
    State(state): State<AddOnState>,
    Path(add_on_id): Path<String>,
    Json(request): Json<AddOnRequest>,
) -> Result<Json<WebResponse<AddOnResponse>>, ApiError> {
    info!("Received request to update add-on with ID: {}", add_on_id);

    let result = state.add_on_service.update(request, &add_on_id).await;
    state
        .metrics
        .record_entity_operation(ENTITY, "update", result.is_ok());

    match result {
        Ok(add_on) => {
            info!("Successfully updated add-on with ID: {}", add_on_id);
            Ok(Json(WebResponse::new(add_on)))
        }
        Err(err) => {
            error!("Failed to update add-on {}: {}", add_on_id, err);
            Err(service_error_to_response(err))
        }
    }
}

#[instrument(name = "remove_add_on", skip(state), fields(add_on_id = %add_on_id))]
pub async fn remove_add_on(
    State(state): State<AddOnState>,
    Path(add_on_id): Path<String>,
) -> Result<Json<WebResponse<&'static str>>, ApiError> {
    info!("Received request to remove add-on with ID: {}", add_on_id);

    let result = state.add_on_service.remove(&add_on_id).await;
    state
        .metrics
        .record_entity_operation(ENTITY, "delete", result.is_ok());

    match result {
        Ok(()) => {
            info!("Successfully removed add-on with ID: {}", add_on_id);
            Ok(Json(WebResponse::new(DELETED)))
        }
        Err(err) => {
            error!("Failed to remove add-on {}: {}", add_on_id, err);
            Err(service_error_to_response(err))
        }
    }
}
