mod catalog_repository;
mod history_repository;
mod table_repository;

pub use catalog_repository::CatalogRepository;
pub use history_repository::HistoryRepository;
pub use table_repository::BuildingTableRepository;
