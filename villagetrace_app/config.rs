use dotenvy::dotenv;
use std::{env, path::PathBuf, str::FromStr};

use villagetrace_game::search::SearchLimits;
use villagetrace_types::{
    buildings::{BuildingId, Points},
    errors::AppError,
};

const DEFAULT_CATALOG_URL: &str =
    "https://{world}.die-staemme.de/interface.php?func=get_building_info";
const DEFAULT_PREBUILT: &str = "hide,main,storage,place,farm";

#[derive(Debug, Clone)]
pub struct Config {
    pub resources_dir: PathBuf,
    /// Building config endpoint, `{world}` is replaced by the world id.
    pub catalog_url: String,
    /// Points of a freshly founded village.
    pub starting_score: Points,
    /// Buildings every village starts with.
    pub prebuilt: Vec<BuildingId>,
    pub max_frontier: Option<usize>,
    /// Compositions are listed only up to this many results.
    pub display_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resources_dir: PathBuf::from("resources"),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            starting_score: 26,
            prebuilt: parse_buildings(DEFAULT_PREBUILT),
            max_frontier: None,
            display_limit: 10,
        }
    }
}

impl Config {
    /// Loads `.env`, then reads the `VILLAGETRACE_*` variables over the defaults.
    ///
    /// A numeric variable that is set but doesn't parse is an error.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let resources_dir = match lookup("VILLAGETRACE_RESOURCES_DIR") {
            Some(val) => PathBuf::from(val),
            None => defaults.resources_dir,
        };

        let catalog_url = match lookup("VILLAGETRACE_CATALOG_URL") {
            Some(val) => val,
            None => defaults.catalog_url,
        };

        let starting_score = match lookup("VILLAGETRACE_STARTING_SCORE") {
            Some(val) => parse_number("VILLAGETRACE_STARTING_SCORE", val)?,
            None => defaults.starting_score,
        };

        let prebuilt = match lookup("VILLAGETRACE_PREBUILT") {
            Some(val) => parse_buildings(&val),
            None => defaults.prebuilt,
        };

        let max_frontier = match lookup("VILLAGETRACE_MAX_FRONTIER") {
            Some(val) => Some(parse_number("VILLAGETRACE_MAX_FRONTIER", val)?),
            None => defaults.max_frontier,
        };

        let display_limit = match lookup("VILLAGETRACE_DISPLAY_LIMIT") {
            Some(val) => parse_number("VILLAGETRACE_DISPLAY_LIMIT", val)?,
            None => defaults.display_limit,
        };

        Ok(Self {
            resources_dir,
            catalog_url,
            starting_score,
            prebuilt,
            max_frontier,
            display_limit,
        })
    }

    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_frontier: self.max_frontier,
        }
    }
}

fn parse_number<T: FromStr>(var: &str, value: String) -> Result<T, AppError> {
    match value.trim().parse::<T>() {
        Ok(number) => Ok(number),
        Err(_) => Err(AppError::InvalidConfig {
            var: var.to_string(),
            value,
        }),
    }
}

fn parse_buildings(list: &str) -> Vec<BuildingId> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| match BuildingId::new(name) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Skipping prebuilt building: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        let prebuilt: Vec<&str> = config.prebuilt.iter().map(BuildingId::as_str).collect();

        assert_eq!(prebuilt, vec!["hide", "main", "storage", "place", "farm"]);
        assert_eq!(config.starting_score, 26);
        assert_eq!(config.search_limits(), SearchLimits::default());
    }

    #[test]
    fn test_catalog_url_has_world_placeholder() {
        let config = Config::default();
        assert!(config.catalog_url.contains("{world}"));
        assert!(config.catalog_url.ends_with("func=get_building_info"));
    }

    #[test]
    fn test_parse_buildings_skips_invalid() {
        let ids = parse_buildings(" main , ,bad id,farm");
        let names: Vec<&str> = ids.iter().map(BuildingId::as_str).collect();
        assert_eq!(names, vec!["main", "farm"]);
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_config_from_vars() {
        let config = Config::from_lookup(lookup(&[
            ("VILLAGETRACE_RESOURCES_DIR", "/tmp/res"),
            ("VILLAGETRACE_STARTING_SCORE", "30"),
            ("VILLAGETRACE_PREBUILT", "main,farm"),
            ("VILLAGETRACE_MAX_FRONTIER", " 1000 "),
            ("VILLAGETRACE_DISPLAY_LIMIT", "3"),
        ]))
        .unwrap();

        assert_eq!(config.resources_dir, PathBuf::from("/tmp/res"));
        assert_eq!(config.starting_score, 30);
        assert_eq!(config.prebuilt.len(), 2);
        assert_eq!(config.max_frontier, Some(1000));
        assert_eq!(config.display_limit, 3);
        assert_eq!(config.catalog_url, Config::default().catalog_url);
    }

    #[test]
    fn test_unset_vars_use_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.starting_score, 26);
        assert_eq!(config.max_frontier, None);
        assert_eq!(config.display_limit, 10);
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let result = Config::from_lookup(lookup(&[("VILLAGETRACE_STARTING_SCORE", "2x6")]));
        assert!(matches!(
            result,
            Err(AppError::InvalidConfig { ref var, ref value })
                if var == "VILLAGETRACE_STARTING_SCORE" && value == "2x6"
        ));

        let result = Config::from_lookup(lookup(&[("VILLAGETRACE_MAX_FRONTIER", "1_000")]));
        assert!(matches!(
            result,
            Err(AppError::InvalidConfig { ref var, .. }) if var == "VILLAGETRACE_MAX_FRONTIER"
        ));

        let result = Config::from_lookup(lookup(&[("VILLAGETRACE_DISPLAY_LIMIT", "-1")]));
        assert!(matches!(result, Err(AppError::InvalidConfig { .. })));
    }
}
