use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use rotator_core::{Category, Location, Site, SiteId};
use rotator_logging::rotator_info;
use serde::Deserialize;
use thiserror::Error;

const URL_DELIMITER: char = '\n';
const LOCATION_DELIMITER: char = ',';

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(String),
    #[error("invalid value [{value}] in column {column} with id {id}")]
    IncompatibleData {
        value: String,
        column: &'static str,
        id: SiteId,
    },
    #[error("duplicate site id {0}")]
    DuplicateId(SiteId),
    #[error("site {0} has no urls")]
    EmptyUrls(SiteId),
    #[error("site {0} has priority 0")]
    InvalidPriority(SiteId),
}

/// On-disk catalog: site rows plus lookup tables for location keys.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    sites: Vec<SiteRecord>,
    #[serde(default)]
    countries: BTreeMap<u32, String>,
    #[serde(default)]
    states: BTreeMap<u32, String>,
    #[serde(default)]
    cities: BTreeMap<u32, String>,
}

#[derive(Debug, Deserialize)]
struct SiteRecord {
    id: SiteId,
    name: String,
    /// Newline separated.
    urls: String,
    #[serde(default)]
    description: String,
    priority: u32,
    #[serde(default)]
    jobboard: bool,
    #[serde(default)]
    organization: bool,
    /// Comma separated keys into the lookup tables.
    #[serde(default)]
    country: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    city: String,
}

pub fn load_catalog(path: &Path) -> Result<Vec<Site>, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let sites = parse_catalog(&text)?;
    rotator_info!("Loaded {} sites from {:?}", sites.len(), path);
    Ok(sites)
}

/// Parses and validates a RON catalog into sites, keeping file order.
pub fn parse_catalog(text: &str) -> Result<Vec<Site>, CatalogError> {
    let file: CatalogFile =
        ron::from_str(text).map_err(|err| CatalogError::Parse(err.to_string()))?;

    let mut seen = HashSet::with_capacity(file.sites.len());
    let mut sites = Vec::with_capacity(file.sites.len());
    for record in &file.sites {
        if !seen.insert(record.id) {
            return Err(CatalogError::DuplicateId(record.id));
        }
        sites.push(build_site(record, &file)?);
    }
    Ok(sites)
}

fn build_site(record: &SiteRecord, file: &CatalogFile) -> Result<Site, CatalogError> {
    let urls = split_urls(&record.urls);
    if urls.is_empty() {
        return Err(CatalogError::EmptyUrls(record.id));
    }
    let priority =
        NonZeroU32::new(record.priority).ok_or(CatalogError::InvalidPriority(record.id))?;

    let mut categories = BTreeSet::new();
    if record.jobboard {
        categories.insert(Category::JobBoard);
    }
    if record.organization {
        categories.insert(Category::Organization);
    }

    let location = Location {
        countries: resolve_locations(&record.country, &file.countries, "country", record.id)?,
        states: resolve_locations(&record.state, &file.states, "state", record.id)?,
        cities: resolve_locations(&record.city, &file.cities, "city", record.id)?,
    };

    Ok(Site {
        id: record.id,
        name: record.name.trim().to_string(),
        description: record.description.trim().to_string(),
        urls,
        priority,
        categories,
        location,
    })
}

fn split_urls(raw: &str) -> Vec<String> {
    raw.split(URL_DELIMITER)
        .map(|url| url.trim().to_lowercase())
        .filter(|url| !url.is_empty())
        .collect()
}

fn resolve_locations(
    raw: &str,
    table: &BTreeMap<u32, String>,
    column: &'static str,
    id: SiteId,
) -> Result<Vec<String>, CatalogError> {
    let incompatible = |value: &str| CatalogError::IncompatibleData {
        value: value.to_string(),
        column,
        id,
    };

    parse_location_keys(raw)
        .map_err(|value| incompatible(&value))?
        .into_iter()
        .map(|key| {
            table
                .get(&key)
                .cloned()
                .ok_or_else(|| incompatible(&key.to_string()))
        })
        .collect()
}

/// Splits `"1, 2,,3"` into keys; the offending item is returned on failure.
fn parse_location_keys(raw: &str) -> Result<Vec<u32>, String> {
    raw.split(LOCATION_DELIMITER)
        .map(|item| item.split_whitespace().collect::<String>())
        .filter(|item| !item.is_empty())
        .map(|item| item.parse::<u32>().map_err(|_| item))
        .collect()
}
