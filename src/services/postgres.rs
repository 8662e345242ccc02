use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::models::Profile;
use crate::services::store::{ParticipantStore, StoreError};

/// Stored participant row
#[derive(Debug, Clone, sqlx::FromRow)]
struct ParticipantRow {
    hackathon: String,
    name: String,
    contact: String,
    roles: Vec<String>,
    skills: Vec<String>,
    interests: Vec<String>,
    availability: String,
    blurb: String,
}

impl From<ParticipantRow> for Profile {
    fn from(row: ParticipantRow) -> Self {
        Profile {
            hackathon: row.hackathon,
            name: row.name,
            contact: row.contact,
            roles: row.roles,
            skills: row.skills,
            interests: row.interests,
            availability: row.availability,
            blurb: row.blurb,
        }
    }
}

/// PostgreSQL-backed participant store
///
/// Every submission is appended; the pool for a hackathon is read back
/// oldest-first so earlier submitters stay ahead of the row limit.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
        )
        .await
    }
}

#[async_trait]
impl ParticipantStore for PostgresClient {
    async fn save(&self, profile: &Profile) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO participants
                (id, hackathon, name, contact, roles, skills, interests, availability, blurb, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
        "#;

        sqlx::query(query)
            .bind(uuid::Uuid::new_v4())
            .bind(&profile.hackathon)
            .bind(&profile.name)
            .bind(&profile.contact)
            .bind(&profile.roles)
            .bind(&profile.skills)
            .bind(&profile.interests)
            .bind(&profile.availability)
            .bind(&profile.blurb)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Saved participant {} for {}", profile.name, profile.hackathon);

        Ok(())
    }

    async fn pool_for(&self, hackathon: &str, limit: usize) -> Result<Vec<Profile>, StoreError> {
        let query = r#"
            SELECT hackathon, name, contact, roles, skills, interests, availability, blurb
            FROM participants
            WHERE hackathon = $1
            ORDER BY created_at ASC
            LIMIT $2
        "#;

        let rows: Vec<ParticipantRow> = sqlx::query_as(query)
            .bind(hackathon)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Loaded {} participants for {}", rows.len(), hackathon);

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
