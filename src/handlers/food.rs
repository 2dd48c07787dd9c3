use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::error::{service_error_to_response, ApiError};
use crate::models::{
    CreateFoodRequest, CreateFoodResponse, FoodResponse, UpdateFoodRequest, WebResponse, DELETED,
};
use crate::observability::Metrics;
use crate::services::FoodService;

const ENTITY: &str = "food";

#[derive(Clone)]
pub struct FoodState {
    pub food_service: Arc<FoodService>,
    pub metrics: Arc<Metrics>,
}

/// Food endpoints, including the outlet-scoped listing
pub fn create_food_router(state: FoodState) -> Router {
    Router::new()
        .route("/api/foods", get(list_all_foods).post(create_food))
        .route(
            "/api/foods/:food_id",
            get(get_food).put(update_food).delete(delete_food),
        )
        .route("/api/outlets/:outlet_id/foods", get(list_outlet_foods))
        .with_state(state)
}

#[instrument(name = "create_food", skip(state, request), fields(
    outlet_id = %request.outlet_id,
    add_ons = request.add_ons.as_ref().map_or(0, Vec::len),
))]
pub async fn create_food(
    State(state): State<FoodState>,
    Json(request): Json<CreateFoodRequest>,
) -> Result<Json<WebResponse<CreateFoodResponse>>, ApiError> {
    info!("Received request to create food item: {}", request.name);

    let result = state.food_service.create(request).await;
    state
        .metrics
        .record_entity_operation(ENTITY, "create", result.is_ok());

    match result {
        Ok(food) => {
            info!("Successfully created food item with ID: {}", food.id);
            Ok(Json(WebResponse::new(food)))
        }
        Err(err) => {
            error!("Failed to create food item: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

#[instrument(name = "get_food", skip(state), fields(food_id = %food_id))]
pub async fn get_food(
    State(state): State<FoodState>,
    Path(food_id): Path<String>,
) -> Result<Json<WebResponse<FoodResponse>>, ApiError> {
    info!("Received request to get food item with ID: {}", food_id);

    let result = state.food_service.get(&food_id).await;
    state
        .metrics
        .record_entity_operation(ENTITY, "get", result.is_ok());

    match result {
        Ok(food) => Ok(Json(WebResponse::new(food))),
        Err(err) => {
            error!("Failed to get food item {}: {}", food_id, err);
            Err(service_error_to_response(err))
        }
    }
}

#[instrument(name = "list_outlet_foods", skip(state), fields(outlet_id = %outlet_id))]
pub async fn list_outlet_foods(
    State(state): State<FoodState>,
    Path(outlet_id): Path<String>,
) -> Result<Json<WebResponse<Vec<FoodResponse>>>, ApiError> {
    info!("Received request to list food items for outlet: {}", outlet_id);

    let result = state.food_service.list(&outlet_id).await;
    state
        .metrics
        .record_entity_operation(ENTITY, "list_by_outlet", result.is_ok());

    match result {
        Ok(foods) => {
            info!("Successfully listed {} food items", foods.len());
            Ok(Json(WebResponse::new(foods)))
        }
        Err(err) => {
            error!("Failed to list food items for outlet {}: {}", outlet_id, err);
            Err(service_error_to_response(err))
        }
    }
}

/// The path identity overrides any `id` in the body
#[instrument(name = "update_food", skip(state, request), fields(food_id = %food_id))]
pub async fn update_food(
    State(state): State<FoodState>,
    Path(food_id): Path<String>,
    Json(mut request): Json<UpdateFoodRequest>,
) -> Result<Json<WebResponse<FoodResponse>>, ApiError> {
    info!("Received request to update food item with ID: {}", food_id);

    request.id = food_id.clone();
    let result = state.food_service.update(request).await;
    state
        .metrics
        .record_entity_operation(ENTITY, "update", result.is_ok());

    match result {
        Ok(food) => {
            info!("Successfully updated food item with ID: {}", food_id);
            Ok(Json(WebResponse::new(food)))
        }
        Err(err) => {
            error!("Failed to update food item {}: {}", food_id, err);
            Err(service_error_to_response(err))
        }
    }
}

#[instrument(name = "delete_food", skip(state), fields(food_id = %food_id))]
pub async fn delete_food(
    State(state): State<FoodState>,
    Path(food_id): Path<String>,
) -> Result<Json<WebResponse<&'static str>>, ApiError> {
    info!("Received request to delete food item with ID: {}", food_id);

    let result = state.food_service.delete(&food_id).await;
    state
        .metrics
        .record_entity_operation(ENTITY, "delete", result.is_ok());

    match result {
        Ok(()) => {
            info!("Successfully deleted food item with ID: {}", food_id);
            Ok(Json(WebResponse::new(DELETED)))
        }
        Err(err) => {
            error!("Failed to delete food item {}: {}", food_id, err);
            Err(service_error_to_response(err))
        }
    }
}

#[instrument(name = "list_all_foods", skip(state))]
pub async fn list_all_foods(
    State(state): State<FoodState>,
) -> Result<Json<WebResponse<Vec<FoodResponse>>>, ApiError> {
    info!("Received request to list all food items");

    let result = state.food_service.list_all().await;
    state
        .metrics
        .record_entity_operation(ENTITY, "list", result.is_ok());

    match result {
        Ok(foods) => Ok(Json(WebResponse::new(foods))),
        Err(err) => {
            error!("Failed to list food items: {}", err);
            Err(service_error_to_response(err))
        }
    }
}
