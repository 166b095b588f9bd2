//! Infrastructure layer - Store, lookup and service implementations

pub mod account;
pub mod logging;
