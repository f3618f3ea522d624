//! Domain models: configuration, diary entities, and digest rendering.

pub mod config;
pub mod diary;
pub mod digest;

pub use config::{Config, ConfigError};
pub use diary::{DiaryComment, DiaryIssue};
