use crate::{
    abstract_trait::UserQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::FindAllUsers,
    errors::RepositoryError,
    model::User as UserModel,
    repository::{limit_offset, search_pattern},
};
use async_trait::async_trait;
use tracing::{error, info};

const USER_FILTER: &str = r#"
    FROM users u
    WHERE ($1::TEXT IS NULL
        OR u.username ILIKE $1
        OR u.email ILIKE $1
        OR u.first_name ILIKE $1
        OR u.last_name ILIKE $1)
"#;

#[derive(Clone)]
pub struct UserQueryRepository {
    db: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_all(&self, req: &FindAllUsers) -> Result<(Vec<UserModel>, i64), RepositoryError> {
        info!("🔍 Fetching users with search: {:?}", req.search);

        let (limit, offset) = limit_offset(req.page, req.page_size);

        let search = search_pattern(&req.search);

        let users = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT u.* {USER_FILTER} ORDER BY u.user_id LIMIT $2 OFFSET $3"
        ))
        .bind(search.clone())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch users: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) {USER_FILTER}"))
            .bind(search)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count users: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok((users, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError> {
        sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch user {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, RepositoryError> {
        sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch user by username {}: {:?}", username, e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch user by email {}: {:?}", email, e);
                RepositoryError::from(e)
            })
    }
}
