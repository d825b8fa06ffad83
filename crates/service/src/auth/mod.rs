//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Signup with unique email, authentication by email and password, and user
//! lookup for entry ownership.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
