use async_trait::async_trait;
use thiserror::Error;

use crate::models::Profile;
use crate::services::seed::seed_pool;

/// Errors that can occur in the participant store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Persistence for submitted participants, scoped by hackathon
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn save(&self, profile: &Profile) -> Result<(), StoreError>;

    /// Up to `limit` participants of one hackathon
    async fn pool_for(&self, hackathon: &str, limit: usize) -> Result<Vec<Profile>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Store the submitter, then load the pool they are ranked against
///
/// Falls back to the built-in seed pool when there is no store, the query
/// fails, or the hackathon has no participants. A failed save is logged
/// and otherwise ignored.
pub async fn submit_and_load_pool(
    store: Option<&dyn ParticipantStore>,
    submitter: &Profile,
    limit: usize,
) -> Vec<Profile> {
    let Some(store) = store else {
        tracing::debug!("No participant store configured, using seed pool");
        return seed_pool();
    };

    if let Err(e) = store.save(submitter).await {
        tracing::warn!("Failed to save participant {}: {}", submitter.name, e);
    }

    match store.pool_for(&submitter.hackathon, limit).await {
        Ok(pool) if !pool.is_empty() => pool,
        Ok(_) => {
            tracing::info!("No participants stored for {}, using seed pool", submitter.hackathon);
            seed_pool()
        }
        Err(e) => {
            tracing::warn!("Failed to load pool for {}, using seed pool: {}", submitter.hackathon, e);
            seed_pool()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        profiles: Mutex<Vec<Profile>>,
        fail_reads: bool,
    }

    #[async_trait]
    impl ParticipantStore for MemoryStore {
        async fn save(&self, profile: &Profile) -> Result<(), StoreError> {
            self.profiles.lock().unwrap().push(profile.clone());
            Ok(())
        }

        async fn pool_for(&self, hackathon: &str, limit: usize) -> Result<Vec<Profile>, StoreError> {
            if self.fail_reads {
                return Err(StoreError::SqlxError(sqlx::Error::PoolTimedOut));
            }
            Ok(self
                .profiles
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.hackathon == hackathon)
                .take(limit)
                .cloned()
                .collect())
        }

        async fn health_check(&self) -> Result<bool, StoreError> {
            Ok(!self.fail_reads)
        }
    }

    fn submitter(name: &str, hackathon: &str) -> Profile {
        Profile {
            hackathon: hackathon.to_string(),
            name: name.to_string(),
            contact: String::new(),
            roles: vec!["FE".to_string()],
            skills: vec![],
            interests: vec![],
            availability: String::new(),
            blurb: String::new(),
        }
    }

    #[tokio::test]
    async fn test_no_store_uses_seed() {
        let pool = submit_and_load_pool(None, &submitter("Zed", "HackDavis"), 200).await;
        assert_eq!(pool, seed_pool());
    }

    #[tokio::test]
    async fn test_later_submitters_see_earlier_ones() {
        let store = MemoryStore::default();

        submit_and_load_pool(Some(&store), &submitter("First", "HackDavis"), 200).await;
        let pool = submit_and_load_pool(Some(&store), &submitter("Second", "HackDavis"), 200).await;

        let names: Vec<&str> = pool.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_pool_is_scoped_and_limited() {
        let store = MemoryStore::default();
        for i in 0..5 {
            store.save(&submitter(&format!("P{}", i), "HackDavis")).await.unwrap();
        }
        store.save(&submitter("Other", "HackHarvard")).await.unwrap();

        let pool = submit_and_load_pool(Some(&store), &submitter("New", "HackDavis"), 3).await;

        assert_eq!(pool.len(), 3);
        assert!(pool.iter().all(|p| p.hackathon == "HackDavis"));
    }

    #[tokio::test]
    async fn test_read_failure_uses_seed() {
        let store = MemoryStore {
            fail_reads: true,
            ..MemoryStore::default()
        };

        let pool = submit_and_load_pool(Some(&store), &submitter("Zed", "HackDavis"), 200).await;
        assert_eq!(pool, seed_pool());
    }
}
