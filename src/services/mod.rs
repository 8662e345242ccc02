// Service exports
pub mod gemini;
pub mod llm;
pub mod postgres;
pub mod seed;
pub mod store;

pub use gemini::GeminiClient;
pub use llm::{GenerationError, TextGenerator};
pub use postgres::PostgresClient;
pub use seed::seed_pool;
pub use store::{submit_and_load_pool, ParticipantStore, StoreError};
