pub mod config;
pub mod cqrs;
pub mod queries_handlers;
pub mod repository;
pub mod sources;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
