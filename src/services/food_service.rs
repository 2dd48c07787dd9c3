use std::sync::Arc;
use tracing::instrument;

use crate::models::{
    AddOn, CreateFoodRequest, CreateFoodResponse, Food, FoodResponse, ServiceError, ServiceResult,
    UpdateFoodRequest,
};
use crate::repositories::{AddOnRepository, FoodRepository, OutletRepository};

/// Service for managing foods and the add-ons created alongside them
pub struct FoodService {
    foods: Arc<dyn FoodRepository>,
    add_ons: Arc<dyn AddOnRepository>,
    outlets: Arc<dyn OutletRepository>,
    validate_outlet_reference: bool,
}

impl FoodService {
    pub fn new(
        foods: Arc<dyn FoodRepository>,
        add_ons: Arc<dyn AddOnRepository>,
        outlets: Arc<dyn OutletRepository>,
    ) -> Self {
        Self {
            foods,
            add_ons,
            outlets,
            validate_outlet_reference: false,
        }
    }

    /// Require the referenced outlet to exist on create and update
    pub fn with_outlet_validation(mut self, enabled: bool) -> Self {
        self.validate_outlet_reference = enabled;
        self
    }

    /// Create a food and, in request order, every embedded add-on.
    ///
    /// The cascade is not atomic: when an add-on fails to persist the food and
    /// the add-ons saved before it stay in storage.
    #[instrument(skip(self, request), fields(outlet_id = %request.outlet_id, name = %request.name))]
    pub async fn create(&self, request: CreateFoodRequest) -> ServiceResult<CreateFoodResponse> {
        crate::info_with_trace!("Creating new food item");

        self.check_outlet(&request.outlet_id).await?;

        let food = self.foods.save(Food::new(&request)).await?;

        let mut add_ons = Vec::new();
        for add_on_request in request.add_ons.iter().flatten() {
            let add_on = self
                .add_ons
                .save(AddOn::new(&food.id, add_on_request))
                .await
                .map_err(|e| {
                    crate::error_with_trace!(
                        food_id = %food.id,
                        created = add_ons.len(),
                        "Add-on creation failed, food is kept"
                    );
                    e
                })?;
            add_ons.push(add_on.to_response());
        }

        crate::info_with_trace!(
            "Food created successfully with ID: {} and {} add-ons",
            food.id,
            add_ons.len()
        );
        Ok(food.to_create_response(add_ons))
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: &str) -> ServiceResult<FoodResponse> {
        crate::info_with_trace!("Retrieving food details");

        match self.foods.find_by_id(id).await? {
            Some(food) => Ok(food.to_response()),
            None => {
                crate::warn_with_trace!("Food not found");
                Err(ServiceError::not_found("Food item not found"))
            }
        }
    }

    /// Foods of one outlet. An outlet without foods is reported as NotFound.
    #[instrument(skip(self), fields(outlet_id = %outlet_id))]
    pub async fn list(&self, outlet_id: &str) -> ServiceResult<Vec<FoodResponse>> {
        crate::info_with_trace!("Listing foods of outlet");

        let foods = self.foods.find_by_outlet(outlet_id).await?;
        if foods.is_empty() {
            crate::warn_with_trace!("No foods found for outlet");
            return Err(ServiceError::not_found("No food items found for this outlet"));
        }

        crate::info_with_trace!("Found {} foods", foods.len());
        Ok(foods.iter().map(Food::to_response).collect())
    }

    /// Full replace of the food named by `request.id`
    #[instrument(skip(self, request), fields(id = %request.id))]
    pub async fn update(&self, request: UpdateFoodRequest) -> ServiceResult<FoodResponse> {
        crate::info_with_trace!("Updating food item");

        let mut food = match self.foods.find_by_id(&request.id).await? {
            Some(food) => food,
            None => {
                crate::warn_with_trace!("Food not found");
                return Err(ServiceError::not_found("Food not found"));
            }
        };

        self.check_outlet(&request.outlet_id).await?;

        food.replace(request);
        let food = self.foods.save(food).await?;

        crate::info_with_trace!("Food updated successfully");
        Ok(food.to_response())
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        crate::info_with_trace!("Deleting food item");

        let food = match self.foods.find_by_id(id).await? {
            Some(food) => food,
            None => {
                crate::warn_with_trace!("Food not found");
                return Err(ServiceError::not_found("Food not found"));
            }
        };

        self.foods.delete(&food).await?;

        crate::info_with_trace!("Food deleted successfully");
        Ok(())
    }

    /// Every food regardless of outlet; empty is a valid answer
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ServiceResult<Vec<FoodResponse>> {
        crate::info_with_trace!("Listing all foods");

        let foods = self.foods.find_all().await?;

        crate::info_with_trace!("Found {} foods", foods.len());
        Ok(foods.iter().map(Food::to_response).collect())
    }

    async fn check_outlet(&self, outlet_id: &str) -> ServiceResult<()> {
        if !self.validate_outlet_reference {
            return Ok(());
        }

        let exists = !outlet_id.is_empty() && self.outlets.exists(outlet_id).await?;
        if !exists {
            crate::warn_with_trace!(outlet_id = %outlet_id, "Outlet not found");
            return Err(ServiceError::not_found("Outlet is not found"));
        }
        Ok(())
    }
}
