mod catalog_repository;
mod history_repository;
mod table_repository;

pub use catalog_repository::{HttpCatalogRepository, parse_building_config};
pub use history_repository::JsonHistoryRepository;
pub use table_repository::JsonTableRepository;
