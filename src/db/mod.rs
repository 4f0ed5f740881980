use sea_orm::{ entity::prelude::*, DatabaseConnection, Set };
use uuid::Uuid;

use crate::error::{ AppError, Result };

pub mod entity;
pub use entity::*;

pub struct WashServiceRepository {
    db: DatabaseConnection,
}

impl WashServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<entity::wash_service::Model> {
        entity::wash_service::Entity
            ::find_by_id(id)
            .one(&self.db).await?
            .ok_or(AppError::ServiceNotFound)
    }

    /// Field-level update: only the price (and updated_at) columns are
    /// written, so concurrent edits to the rest of the row survive.
    pub async fn update_price(
        &self,
        service: entity::wash_service::Model,
        new_price: i64
    ) -> Result<entity::wash_service::Model> {
        let mut active: entity::wash_service::ActiveModel = service.into();
        active.price = Set(new_price);
        active.updated_at = Set(chrono::Utc::now());

        Ok(active.update(&self.db).await?)
    }
}
