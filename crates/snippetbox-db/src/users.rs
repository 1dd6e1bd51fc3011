use async_trait::async_trait;
use sqlx::PgPool;

use snippetbox_core::password::{hash_password, verify_password};
use snippetbox_models::{ModelError, User, UserId, UserStore};

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_uc_email";

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn password_hash(&self, id: UserId) -> Result<String, ModelError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT hashed_password FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|(hash,)| hash).ok_or(ModelError::NoRecord)
    }
}

fn is_duplicate_email(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
        }
        _ => false,
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, name: &str, email: &str, password: &str) -> Result<UserId, ModelError> {
        let hashed = hash_password(password)?;

        let result = sqlx::query_as::<_, (UserId,)>(
            r#"
            INSERT INTO users (name, email, hashed_password, created)
            VALUES ($1, $2, $3, NOW())
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(hashed)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok((id,)) => Ok(id),
            Err(e) if is_duplicate_email(&e) => Err(ModelError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId, ModelError> {
        let row: Option<(UserId, String)> =
            sqlx::query_as("SELECT id, hashed_password FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        let Some((id, hashed)) = row else {
            return Err(ModelError::InvalidCredentials);
        };

        if !verify_password(password, &hashed)? {
            return Err(ModelError::InvalidCredentials);
        }
        Ok(id)
    }

    async fn exists(&self, id: UserId) -> Result<bool, ModelError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT true FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn get(&self, id: UserId) -> Result<User, ModelError> {
        sqlx::query_as::<_, User>("SELECT id, name, email, created FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ModelError::NoRecord)
    }

    async fn update_password(
        &self,
        id: UserId,
        current: &str,
        new: &str,
    ) -> Result<(), ModelError> {
        let hashed = self.password_hash(id).await?;
        if !verify_password(current, &hashed)? {
            return Err(ModelError::InvalidCredentials);
        }

        let new_hash = hash_password(new)?;
        sqlx::query("UPDATE users SET hashed_password = $1 WHERE id = $2")
            .bind(new_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_duplicate_email_maps_to_typed_error(pool: PgPool) {
        let store = PgUserStore::new(pool);
        store.create("Alice", "alice@example.com", "pa55word").await.unwrap();

        let err = store
            .create("Alice Again", "alice@example.com", "pa55word")
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateEmail));
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_password_update_flow(pool: PgPool) {
        let store = PgUserStore::new(pool);
        let id = store.create("Bob", "bob@example.com", "pa55word").await.unwrap();

        assert!(store.exists(id).await.unwrap());
        assert!(!store.exists(UserId(id.0 + 1000)).await.unwrap());
        assert_eq!(store.get(id).await.unwrap().email, "bob@example.com");

        let err = store.update_password(id, "wrong", "newpa55word").await.unwrap_err();
        assert!(matches!(err, ModelError::InvalidCredentials));
        assert_eq!(store.authenticate("bob@example.com", "pa55word").await.unwrap(), id);

        store.update_password(id, "pa55word", "newpa55word").await.unwrap();
        assert!(matches!(
            store.authenticate("bob@example.com", "pa55word").await,
            Err(ModelError::InvalidCredentials)
        ));
    }
}
