//! Common types used across the application.

pub mod land;
pub mod pagination;

pub use land::LandSize;
pub use pagination::{PageMeta, PageRequest, PageResponse};
