use serde::Deserialize;
use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use villagetrace_app::repository::CatalogRepository;
use villagetrace_game::models::catalog::RawBuilding;
use villagetrace_types::{
    buildings::{BuildingId, Level},
    errors::{AppError, ApplicationError},
};

use crate::files;

/// One `<config>` child of the world's building info.
#[derive(Debug, Deserialize)]
struct BuildingInfo {
    min_level: Level,
    max_level: Level,
}

/// Parses the building info published by a world (`interface.php?func=get_building_info`).
pub fn parse_building_config(xml: &str) -> Result<Vec<RawBuilding>, ApplicationError> {
    let config: BTreeMap<String, BuildingInfo> =
        quick_xml::de::from_str(xml).map_err(AppError::from)?;

    config
        .into_iter()
        .map(|(name, info)| {
            Ok(RawBuilding {
                id: BuildingId::new(&name)?,
                min_level: info.min_level,
                max_level: info.max_level,
            })
        })
        .collect()
}

/// Downloads the building config of a world once, then serves it from a local file.
#[derive(Debug, Clone)]
pub struct HttpCatalogRepository {
    client: reqwest::Client,
    url_template: String,
    cache_dir: PathBuf,
}

impl HttpCatalogRepository {
    /// `url_template` must contain `{world}`, replaced by the requested world id.
    pub fn new(url_template: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url_template: url_template.into(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_path(&self, world: &str) -> PathBuf {
        self.cache_dir.join(format!("building_info_{world}.xml"))
    }

    async fn fetch(&self, world: &str) -> Result<String, AppError> {
        let url = self.url_template.replace("{world}", world);
        tracing::info!(%url, "Fetching building config");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AppError::CatalogStatus {
                world: world.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn cached(&self, path: &Path) -> Result<Option<String>, AppError> {
        match tokio::fs::read_to_string(path).await {
            Ok(xml) => Ok(Some(xml)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AppError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

#[async_trait::async_trait]
impl CatalogRepository for HttpCatalogRepository {
    async fn raw_buildings(&self, world: &str) -> Result<Vec<RawBuilding>, ApplicationError> {
        let path = self.cache_path(world);
        if let Some(xml) = self.cached(&path).await? {
            tracing::debug!(path = %path.display(), "Building config read from cache");
            return parse_building_config(&xml);
        }

        // only a config that parses is worth caching
        let xml = self.fetch(world).await?;
        let buildings = parse_building_config(&xml)?;
        files::write(&path, &xml).await?;
        tracing::debug!(path = %path.display(), "Building config cached");
        Ok(buildings)
    }
}
