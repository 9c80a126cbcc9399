use sea_orm::{entity::prelude::*, DatabaseConnection, Set};

use crate::errors::ModelError;

#[derive(Clone, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "app")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub secret: String,
}

// Hand-written so the signing secret never reaches a log line.
impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Provision a client application.
pub async fn create(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
    secret: &str,
) -> Result<Model, ModelError> {
    if id == 0 {
        return Err(ModelError::Validation("app id must be non-zero".into()));
    }
    if name.trim().is_empty() {
        return Err(ModelError::Validation("app name required".into()));
    }
    if secret.is_empty() {
        return Err(ModelError::Validation("app secret required".into()));
    }
    let am = ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        secret: Set(secret.to_string()),
    };
    am.insert(db).await.map_err(|e| ModelError::from_insert(e, "app"))
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}
