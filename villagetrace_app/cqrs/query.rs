use async_trait::async_trait;
use std::sync::Arc;
use villagetrace_types::errors::ApplicationError;

use crate::{config::Config, sources::DataSources};

/// A marker trait for Query structs.
/// Queries are operations that read the state of the system.
pub trait Query: Send + Sync {
    /// The data type that this query will return.
    type Output: Send + Sync;
}

/// A trait for handlers that execute Queries.
/// It receives the query and the data sources to read from.
#[async_trait]
pub trait QueryHandler<Q: Query> {
    async fn handle(
        &self,
        query: Q,
        sources: &dyn DataSources,
        config: &Arc<Config>,
    ) -> Result<Q::Output, ApplicationError>;
}
