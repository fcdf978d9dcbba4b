use crate::types::{AppError, Result};
use chrono::Utc;
use libsql::{Builder, Connection, Database};

/// Persisted principal record.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub business_name: String,
    pub cac_number: String,
    pub role: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// libsql-backed principal store.
///
/// The UNIQUE indexes on `email` and `business_name` are load-bearing: the
/// service's existence checks are not atomic with the insert, so concurrent
/// signups for the same identity are resolved by the storage layer.
pub struct UserStore {
    _db: Database,
    conn: Connection,
}

impl UserStore {
    /// Opens an in-memory store (ephemeral, lost on shutdown).
    pub async fn new_memory() -> Result<Self> {
        Self::open(":memory:").await
    }

    /// Opens a file-backed store at the given path.
    pub async fn new_local(path: &str) -> Result<Self> {
        Self::open(path).await
    }

    async fn open(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;
        let conn = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;

        let store = Self { _db: db, conn };
        store.initialize_schema().await?;

        Ok(store)
    }

    async fn initialize_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    email TEXT UNIQUE NOT NULL,
                    password_hash TEXT NOT NULL,
                    business_name TEXT UNIQUE NOT NULL,
                    cac_number TEXT NOT NULL,
                    role TEXT NOT NULL DEFAULT 'user',
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }

    /// Inserts a new principal.
    ///
    /// A uniqueness violation on email or business name surfaces as a
    /// conflict, not a database error, so races between the service's
    /// existence check and the insert still report correctly.
    pub async fn create_user(&self, user: &User) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO users
                   (id, email, password_hash, business_name, cac_number, role, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                (
                    user.id.as_str(),
                    user.email.as_str(),
                    user.password_hash.as_str(),
                    user.business_name.as_str(),
                    user.cac_number.as_str(),
                    user.role.as_str(),
                    user.created_at,
                    user.updated_at,
                ),
            )
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("UNIQUE constraint failed: users.email") {
                    AppError::Conflict("Email already exists".to_string())
                } else if msg.contains("UNIQUE constraint failed: users.business_name") {
                    AppError::Conflict(
                        "businessName has already been used for another business".to_string(),
                    )
                } else {
                    AppError::Database(format!("Failed to create user: {}", msg))
                }
            })?;

        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_one("email", email).await
    }

    pub async fn find_by_business_name(&self, business_name: &str) -> Result<Option<User>> {
        self.find_one("business_name", business_name).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        self.find_one("id", id).await
    }

    async fn find_one(&self, column: &str, param: &str) -> Result<Option<User>> {
        // `column` is a fixed identifier supplied by the wrappers above, never
        // user input.
        let query = format!(
            "SELECT id, email, password_hash, business_name, cac_number, role, created_at, updated_at
             FROM users WHERE {} = ?",
            column
        );

        let mut rows = self
            .conn
            .query(&query, [param])
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Ok(Some(User {
                id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
                email: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
                password_hash: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
                business_name: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
                cac_number: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
                role: row.get(5).map_err(|e| AppError::Database(e.to_string()))?,
                created_at: row.get(6).map_err(|e| AppError::Database(e.to_string()))?,
                updated_at: row.get(7).map_err(|e| AppError::Database(e.to_string()))?,
            }))
        } else {
            Ok(None)
        }
    }
}

impl User {
    /// Builds a fresh principal record with the default role.
    pub fn new(
        id: String,
        email: String,
        password_hash: String,
        business_name: String,
        cac_number: String,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id,
            email,
            password_hash,
            business_name,
            cac_number,
            role: "user".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
