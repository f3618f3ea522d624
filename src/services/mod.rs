//! Service layer: the diary synchronization routine.

pub mod diary_sync;

pub use diary_sync::DiarySyncService;
