//! Nikki - Diary Issue Rollover Bot
//!
//! Nikki closes a repository's open diary issues, relays each one's digest
//! (title, checklist body, comment history) to a Typetalk topic, and opens
//! the next day's entry.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): configuration, diary entities, and digest
//!   rendering — pure logic, no I/O
//! - **Adapter Layer** (`adapters`): GitHub and Typetalk HTTP clients
//! - **Service Layer** (`services`): the three-phase sync routine
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use nikki::{Config, DiarySyncService};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env().expect("missing required configuration");
//!     DiarySyncService::from_config(config).run().await.ok();
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{Config, ConfigError, DiaryComment, DiaryIssue};
pub use services::DiarySyncService;
