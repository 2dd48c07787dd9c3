use std::sync::Arc;
use tracing::instrument;

use crate::models::{AddOn, AddOnRequest, AddOnResponse, Food, ServiceError, ServiceResult};
use crate::repositories::{AddOnRepository, FoodRepository};

/// Service for managing add-ons attached to existing foods
pub struct AddOnService {
    foods: Arc<dyn FoodRepository>,
    add_ons: Arc<dyn AddOnRepository>,
}

impl AddOnService {
    pub fn new(foods: Arc<dyn FoodRepository>, add_ons: Arc<dyn AddOnRepository>) -> Self {
        Self { foods, add_ons }
    }

    #[instrument(skip(self, request), fields(food_id = %request.food_id))]
    pub async fn create(&self, request: AddOnRequest) -> ServiceResult<AddOnResponse> {
        crate::info_with_trace!("Creating add-on");

        let food = self.require_food(&request.food_id).await?;
        let add_on = self.add_ons.save(AddOn::new(&food.id, &request)).await?;

        crate::info_with_trace!("Add-on created successfully with ID: {}", add_on.id);
        Ok(add_on.to_response())
    }

    /// Replace the add-on `id`, which must already belong to `request.food_id`
    #[instrument(skip(self, request), fields(id = %id, food_id = %request.food_id))]
    pub async fn update(&self, mut request: AddOnRequest, id: &str) -> ServiceResult<AddOnResponse> {
        crate::info_with_trace!("Updating add-on");

        request.id = id.to_string();
        self.require_food(&request.food_id).await?;

        let mut add_on = match self.add_ons.find_by_food_and_id(&request.food_id, id).await? {
            Some(add_on) => add_on,
            None => {
                crate::warn_with_trace!("Add-on not found for food");
                return Err(ServiceError::not_found("Add On is not found"));
            }
        };

        add_on.replace(&request);
        let add_on = self.add_ons.save(add_on).await?;

        crate::info_with_trace!("Add-on updated successfully");
        Ok(add_on.to_response())
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn remove(&self, id: &str) -> ServiceResult<()> {
        crate::info_with_trace!("Removing add-on");

        let add_on = match self.add_ons.find_by_id(id).await? {
            Some(add_on) => add_on,
            None => {
                crate::warn_with_trace!("Add-on not found");
                return Err(ServiceError::not_found("Add On is not found"));
            }
        };

        self.add_ons.delete(&add_on).await?;

        crate::info_with_trace!(food_id = %add_on.food_id, "Add-on removed successfully");
        Ok(())
    }

    async fn require_food(&self, food_id: &str) -> ServiceResult<Food> {
        let food = if food_id.is_empty() {
            None
        } else {
            self.foods.find_by_id(food_id).await?
        };

        food.ok_or_else(|| {
            crate::warn_with_trace!(food_id = %food_id, "Food not found");
            ServiceError::not_found("Food is not found")
        })
    }
}
