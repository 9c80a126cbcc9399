use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a new user with a freshly generated id.
pub async fn create(
    db: &DatabaseConnection,
    email: &str,
    password_hash: &str,
) -> Result<Model, ModelError> {
    if email.trim().is_empty() {
        return Err(ModelError::Validation("email required".into()));
    }
    if password_hash.is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash.to_string()),
        is_admin: Set(false),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ModelError::from_insert(e, "user"))
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email)).one(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id.to_string()).one(db).await?)
}

/// Grant or revoke admin rights; returns `false` when no user has that id.
pub async fn set_admin(
    db: &DatabaseConnection,
    id: &str,
    is_admin: bool,
) -> Result<bool, ModelError> {
    let Some(found) = find_by_id(db, id).await? else {
        return Ok(false);
    };
    let mut am: ActiveModel = found.into();
    am.is_admin = Set(is_admin);
    am.update(db).await?;
    Ok(true)
}
