use std::sync::Arc;

use villagetrace_app::{
    config::Config,
    repository::{BuildingTableRepository, CatalogRepository, HistoryRepository},
    sources::DataSources,
};

use crate::repository::{HttpCatalogRepository, JsonHistoryRepository, JsonTableRepository};

/// Data sources backed by the resources directory, fetching world configs on demand.
#[derive(Clone)]
pub struct FileDataSources {
    catalog: Arc<HttpCatalogRepository>,
    tables: Arc<JsonTableRepository>,
    history: Arc<JsonHistoryRepository>,
}

impl FileDataSources {
    pub fn new(config: &Config) -> Self {
        let dir = &config.resources_dir;
        Self {
            catalog: Arc::new(HttpCatalogRepository::new(config.catalog_url.clone(), dir)),
            tables: Arc::new(JsonTableRepository::new(dir)),
            history: Arc::new(JsonHistoryRepository::new(dir)),
        }
    }
}

impl DataSources for FileDataSources {
    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog.clone()
    }

    fn tables(&self) -> Arc<dyn BuildingTableRepository> {
        self.tables.clone()
    }

    fn history(&self) -> Arc<dyn HistoryRepository> {
        self.history.clone()
    }
}
