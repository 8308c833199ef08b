use std::sync::Arc;

use crate::repository::*;

/// Provides the repositories a reconstruction reads from.
pub trait DataSources: Send + Sync {
    fn catalog(&self) -> Arc<dyn CatalogRepository>;
    fn tables(&self) -> Arc<dyn BuildingTableRepository>;
    fn history(&self) -> Arc<dyn HistoryRepository>;
}
