pub mod models;
pub mod search;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
