use sea_orm::prelude::*;

use crate::entities::users::{Column, Entity, Model};

impl Model {
    pub async fn find_by_username<T: ToString>(
        db: &DatabaseConnection,
        username: T,
    ) -> Result<Option<Self>, DbErr> {
        let query = Entity::find().filter(Column::Username.eq(username.to_string()));

        query.one(db).await.inspect_err(|e| {
            ::tracing::error!("Failed to find user by username");
            ::tracing::error!("Error: {}", e);
        })
    }
}
