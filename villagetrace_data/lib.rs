mod files;
mod repository;
mod sources;

pub use repository::*;
pub use sources::FileDataSources;
