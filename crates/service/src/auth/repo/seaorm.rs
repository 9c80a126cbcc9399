use sea_orm::DatabaseConnection;

use crate::auth::domain::{App, User};
use crate::auth::errors::StorageError;
use crate::auth::repository::{AppProvider, UserProvider, UserSaver};
use models::errors::ModelError;

/// Storage contracts backed by the SQLite schema in `models`.
#[derive(Clone)]
pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: ModelError) -> StorageError {
    StorageError::Db(e.to_string())
}

#[async_trait::async_trait]
impl UserSaver for SeaOrmAuthRepository {
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<String, StorageError> {
        match models::user::create(&self.db, email, password_hash).await {
            Ok(created) => Ok(created.id),
            Err(ModelError::Conflict(_)) => Err(StorageError::UserExists),
            Err(e) => Err(db_err(e)),
        }
    }
}

#[async_trait::async_trait]
impl UserProvider for SeaOrmAuthRepository {
    async fn user(&self, email: &str) -> Result<User, StorageError> {
        let found = models::user::find_by_email(&self.db, email)
            .await
            .map_err(db_err)?
            .ok_or(StorageError::UserNotFound)?;
        Ok(User { id: found.id, email: found.email, password_hash: found.password_hash })
    }

    async fn is_admin(&self, user_id: &str) -> Result<bool, StorageError> {
        let found = models::user::find_by_id(&self.db, user_id)
            .await
            .map_err(db_err)?
            .ok_or(StorageError::UserNotFound)?;
        Ok(found.is_admin)
    }
}

#[async_trait::async_trait]
impl AppProvider for SeaOrmAuthRepository {
    async fn app(&self, app_id: i32) -> Result<App, StorageError> {
        let found = models::app::find_by_id(&self.db, app_id)
            .await
            .map_err(db_err)?
            .ok_or(StorageError::AppNotFound)?;
        Ok(App::new(found.id, found.name, found.secret))
    }
}
