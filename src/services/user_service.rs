use tracing::{info, warn};

use crate::auth::AuthError;
use crate::database::models::{User, UserJson};
use crate::database::{Database, DatabaseError};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] AuthError),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

const USER_COLUMNS: &str = "id, username, password, faculty, department";

/// Hash the password and persist a new user
pub async fn create_user(
    db: &Database,
    username: &str,
    password: &str,
    faculty: &str,
    department: &str,
) -> Result<User, UserError> {
    let user = User::new(username, password, faculty, department)?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, password, faculty, department)
         VALUES (?, ?, ?, ?)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(&user.username)
    .bind(&user.password)
    .bind(&user.faculty)
    .bind(&user.department)
    .fetch_one(db.pool())
    .await
    .map_err(DatabaseError::from)?;

    info!("Created user {} ({:?})", user.username, user.id);
    Ok(user)
}

/// Verify credentials. Only username and password take part in the check.
pub async fn authenticate(
    db: &Database,
    username: &str,
    password: &str,
    _faculty: &str,
    _department: &str,
) -> Result<Option<User>, DatabaseError> {
    let Some(user) = get_user_by_username(db, username).await? else {
        warn!("Login attempt for unknown user {}", username);
        return Ok(None);
    };

    if user.check_password(password) {
        Ok(Some(user))
    } else {
        warn!("Password mismatch for user {}", username);
        Ok(None)
    }
}

pub async fn get_user(db: &Database, id: i64) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(db.pool())
        .await?;
    Ok(user)
}

pub async fn get_user_by_username(
    db: &Database,
    username: &str,
) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
    ))
    .bind(username)
    .fetch_optional(db.pool())
    .await?;
    Ok(user)
}

pub async fn get_all_users(db: &Database) -> Result<Vec<User>, DatabaseError> {
    let users = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
        .fetch_all(db.pool())
        .await?;
    Ok(users)
}

pub async fn get_all_users_json(db: &Database) -> Result<Vec<UserJson>, DatabaseError> {
    Ok(get_all_users(db).await?.iter().map(User::to_json).collect())
}

/// Overwrite username, faculty and department. The password is left alone.
pub async fn update_user(
    db: &Database,
    id: i64,
    username: &str,
    faculty: &str,
    department: &str,
) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET username = ?, faculty = ?, department = ?
         WHERE id = ?
         RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(faculty)
    .bind(department)
    .bind(id)
    .fetch_optional(db.pool())
    .await?;

    if user.is_some() {
        info!("Updated user {}", id);
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    #[tokio::test]
    async fn test_authenticate() {
        let ctx = TestContext::new().await.unwrap();
        create_user(ctx.db(), "bob", "bobpass", "FST", "DCIT").await.unwrap();

        let user = authenticate(ctx.db(), "bob", "bobpass", "FST", "DCIT").await.unwrap();
        assert!(user.is_some());
    }

    #[tokio::test]
    async fn authenticate_rejects_bad_credentials() {
        let ctx = TestContext::new().await.unwrap();
        create_user(ctx.db(), "bob", "bobpass", "FST", "DCIT").await.unwrap();

        assert!(authenticate(ctx.db(), "bob", "wrong", "FST", "DCIT").await.unwrap().is_none());
        assert!(authenticate(ctx.db(), "nobody", "bobpass", "FST", "DCIT").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_user() {
        let ctx = TestContext::new().await.unwrap();
        let user = create_user(ctx.db(), "bobby", "bobpass", "FST", "DCIT").await.unwrap();

        let stored = get_user(ctx.db(), user.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.username, "bobby");
        assert_ne!(stored.password, "bobpass");
        assert!(stored.check_password("bobpass"));
    }

    #[tokio::test]
    async fn test_get_all_users_json() {
        let ctx = TestContext::new().await.unwrap();
        create_user(ctx.db(), "bobby", "bobpass", "FST", "DCIT").await.unwrap();

        let users = get_all_users_json(ctx.db()).await.unwrap();
        assert_eq!(
            users,
            vec![UserJson {
                id: Some(1),
                username: "bobby".to_string(),
                faculty: "FST".to_string(),
                department: "DCIT".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn lists_users_in_insertion_order() {
        let ctx = TestContext::new().await.unwrap();
        for name in ["carol", "alice", "bob"] {
            create_user(ctx.db(), name, "pw", "FST", "DCIT").await.unwrap();
        }

        let names: Vec<_> = get_all_users(ctx.db())
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, ["carol", "alice", "bob"]);
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let ctx = TestContext::new().await.unwrap();
        create_user(ctx.db(), "bob", "bobpass", "FST", "DCIT").await.unwrap();

        let err = create_user(ctx.db(), "bob", "other", "FSS", "DOE").await.unwrap_err();
        assert!(matches!(err, UserError::Database(DatabaseError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_user() {
        let ctx = TestContext::new().await.unwrap();
        let user = create_user(ctx.db(), "rick", "bobpass", "FSS", "DOE").await.unwrap();
        let id = user.id.unwrap();

        update_user(ctx.db(), id, "ronnie", "FST", "DCIT").await.unwrap();

        let updated = get_user(ctx.db(), id).await.unwrap().unwrap();
        assert_eq!(updated.username, "ronnie");
        assert_eq!((updated.faculty.as_str(), updated.department.as_str()), ("FST", "DCIT"));
        assert_eq!(updated.password, user.password);
        assert!(get_user_by_username(ctx.db(), "rick").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_user_returns_none_and_changes_nothing() {
        let ctx = TestContext::new().await.unwrap();
        create_user(ctx.db(), "rick", "bobpass", "FSS", "DOE").await.unwrap();
        let before = get_all_users(ctx.db()).await.unwrap();

        let result = update_user(ctx.db(), 99, "ronnie", "FST", "DCIT").await.unwrap();

        assert!(result.is_none());
        assert_eq!(get_all_users(ctx.db()).await.unwrap(), before);
    }
}
