use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{RepositoryError, RepositoryResult},
    models::{NewUser, User},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository backed by SeaORM
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Translate a SeaORM error into a repository error kind.
fn map_db_err(err: DbErr, email: Option<&str>) -> RepositoryError {
    classify(err.sql_err(), &err, email)
}

// Unique violations can only come from the `email` column.
fn classify(sql_err: Option<SqlErr>, err: &DbErr, email: Option<&str>) -> RepositoryError {
    match (sql_err, email) {
        (Some(SqlErr::UniqueConstraintViolation(_)), Some(email)) => {
            RepositoryError::DuplicateEmail(email.to_string())
        }
        _ => RepositoryError::Storage(format!("Database error: {}", err)),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: NewUser) -> RepositoryResult<User> {
        let email = input.email.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err(e, Some(&email)))?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<User> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err(e, None))?
            .ok_or(RepositoryError::NotFound(id))?;

        Ok(model.into())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(e, None))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, mut user: User) -> RepositoryResult<User> {
        let id = user.id;
        let email = user.email.clone();
        user.touch();

        let active_model: entity::ActiveModel = user.into();

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepositoryError::NotFound(id),
            e => map_db_err(e, Some(&email)),
        })?;

        tracing::info!(user_id = %id, "Updated user");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, None))?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
