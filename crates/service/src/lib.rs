//! Service layer for the finance tracker.
//! - Entry validation, query by example, balance and CRUD orchestration.
//! - User signup and authentication.
//! - Repository traits with SeaORM and in-memory implementations.

pub mod errors;
pub mod auth;
pub mod entry;
#[cfg(test)]
pub mod test_support;
