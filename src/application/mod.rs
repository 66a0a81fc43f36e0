//! Application layer - Commands, Queries, and Handlers.
//!
//! Handlers orchestrate domain operations over the ports. Each takes its
//! collaborators as `Arc<dyn Port>` and exposes one `handle` method, except
//! the catalog handlers which group add/edit/delete per catalog.

pub mod handlers;

pub use handlers::{CatalogPorts, Notice, NoticeLevel};
