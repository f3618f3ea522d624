//! Typetalk notification adapter.
//!
//! Delivers the rendered diary digest to a Typetalk topic.

pub mod client;
pub mod models;
