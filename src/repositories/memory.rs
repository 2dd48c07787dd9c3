//! Process-local repositories backed by `HashMap`s.
//!
//! Used by the `memory` storage backend, the integration tests and the
//! benchmarks. Listings are ordered by name, then id, so callers get a
//! stable order regardless of hash iteration.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{AddOnRepository, FoodRepository, OutletRepository};
use crate::models::{AddOn, Food, Outlet, RepositoryError, RepositoryResult};

fn sorted<T: Clone>(values: impl Iterator<Item = T>, key: impl Fn(&T) -> (String, String)) -> Vec<T> {
    let mut values: Vec<T> = values.collect();
    values.sort_by_key(|value| key(value));
    values
}

#[derive(Clone, Default)]
pub struct InMemoryFoodRepository {
    foods: Arc<RwLock<HashMap<String, Food>>>,
}

impl InMemoryFoodRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.foods.read().await.len()
    }
}

#[async_trait]
impl FoodRepository for InMemoryFoodRepository {
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Food>> {
        Ok(self.foods.read().await.get(id).cloned())
    }

    async fn find_by_outlet(&self, outlet_id: &str) -> RepositoryResult<Vec<Food>> {
        let foods = self.foods.read().await;
        Ok(sorted(
            foods.values().filter(|f| f.outlet_id == outlet_id).cloned(),
            |f| (f.name.clone(), f.id.clone()),
        ))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Food>> {
        let foods = self.foods.read().await;
        Ok(sorted(foods.values().cloned(), |f| (f.name.clone(), f.id.clone())))
    }

    async fn save(&self, food: Food) -> RepositoryResult<Food> {
        self.foods
            .write()
            .await
            .insert(food.id.clone(), food.clone());
        Ok(food)
    }

    async fn delete(&self, food: &Food) -> RepositoryResult<()> {
        self.foods
            .write()
            .await
            .remove(&food.id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAddOnRepository {
    add_ons: Arc<RwLock<HashMap<String, AddOn>>>,
}

impl InMemoryAddOnRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.add_ons.read().await.len()
    }
}

#[async_trait]
impl AddOnRepository for InMemoryAddOnRepository {
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<AddOn>> {
        Ok(self.add_ons.read().await.get(id).cloned())
    }

    async fn find_by_food_and_id(
        &self,
        food_id: &str,
        id: &str,
    ) -> RepositoryResult<Option<AddOn>> {
        Ok(self
            .add_ons
            .read()
            .await
            .get(id)
            .filter(|a| a.food_id == food_id)
            .cloned())
    }

    async fn find_by_food(&self, food_id: &str) -> RepositoryResult<Vec<AddOn>> {
        let add_ons = self.add_ons.read().await;
        Ok(sorted(
            add_ons.values().filter(|a| a.food_id == food_id).cloned(),
            |a| (a.name.clone(), a.id.clone()),
        ))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<AddOn>> {
        let add_ons = self.add_ons.read().await;
        Ok(sorted(add_ons.values().cloned(), |a| (a.name.clone(), a.id.clone())))
    }

    async fn save(&self, add_on: AddOn) -> RepositoryResult<AddOn> {
        self.add_ons
            .write()
            .await
            .insert(add_on.id.clone(), add_on.clone());
        Ok(add_on)
    }

    async fn delete(&self, add_on: &AddOn) -> RepositoryResult<()> {
        self.add_ons
            .write()
            .await
            .remove(&add_on.id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryOutletRepository {
    outlets: Arc<RwLock<HashMap<String, Outlet>>>,
}

impl InMemoryOutletRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OutletRepository for InMemoryOutletRepository {
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Outlet>> {
        Ok(self.outlets.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Outlet>> {
        let outlets = self.outlets.read().await;
        Ok(sorted(outlets.values().cloned(), |o| (o.name.clone(), o.id.clone())))
    }

    async fn save(&self, outlet: Outlet) -> RepositoryResult<Outlet> {
        self.outlets
            .write()
            .await
            .insert(outlet.id.clone(), outlet.clone());
        Ok(outlet)
    }

    async fn delete(&self, outlet: &Outlet) -> RepositoryResult<()> {
        self.outlets
            .write()
            .await
            .remove(&outlet.id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
