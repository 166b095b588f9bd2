//! Account infrastructure module
//!
//! In-memory account store, uniqueness lookups built on it, the signup
//! service that creates accounts and the authorized admin service.

mod admin;
mod lookup;
mod repository;
mod service;

pub use admin::AccountAdminService;
pub use lookup::{RepositoryLookup, StaticLookup};
pub use repository::InMemoryAccountRepository;
pub use service::SignupService;
