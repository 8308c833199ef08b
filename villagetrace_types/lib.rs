pub mod buildings;
pub mod errors;
pub mod history;

pub use errors::Result;
