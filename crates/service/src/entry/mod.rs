//! Financial entries: domain, validation, query by example, persistence and service.

pub mod domain;
pub mod validation;
pub mod filter;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Entry, EntryStatus, EntryType};
pub use filter::EntryFilter;
pub use service::EntryService;
