//! Category / region / sort tables

pub mod types;
mod utils;


pub use types::*;
use utils::*;

use crate::error::{Result, ScoutError};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

impl Taxonomy {
    /// Build from already-parsed tables; the sort table is the built-in one.
    pub fn new(categories: CategoryMap, regions: RegionMap) -> Self {
        let regions = regions
            .into_iter()
            .fold(RegionMap::new(), |mut acc, (city, areas)| {
                acc.entry(city.to_lowercase()).or_default().extend(areas);
                acc
            });
        Self {
            categories,
            regions,
            sorts: SORT_TABLE
                .iter()
                .map(|(label, code)| (label.to_string(), code.to_string()))
                .collect(),
        }
    }

    /// Parse both tables from their text form.
    pub fn parse(menu: &str, regions: &str) -> Self {
        Self::new(parse_category_lines(menu), parse_region_lines(regions))
    }

    /// Load both tables from disk. A missing file is a configuration error.
    pub fn load(menu_path: &Path, region_path: &Path) -> Result<Self> {
        let menu = read_table(menu_path)?;
        let regions = read_table(region_path)?;
        Ok(Self::parse(&menu, &regions))
    }

    pub fn category_path(&self, category: &str) -> Option<&str> {
        self.categories.get(category).map(String::as_str)
    }

    /// Regions of a city; `city` is matched case-insensitively.
    pub fn city_regions(&self, city: &str) -> Option<&BTreeMap<String, String>> {
        self.regions.get(&city.to_lowercase())
    }

    /// Resolve a sort selector to `(label, fragment)`.
    ///
    /// Empty input means the default order. Both labels and raw fragments
    /// (`o3`) are accepted.
    pub fn resolve_sort(&self, sort: &str) -> Option<(&str, &str)> {
        let sort = sort.trim();
        let wanted = if sort.is_empty() { DEFAULT_SORT_LABEL } else { sort };
        self.sorts
            .iter()
            .find(|(label, code)| label == wanted || (!code.is_empty() && code == wanted))
            .map(|(label, code)| (label.as_str(), code.as_str()))
    }

    pub fn overview(&self) -> TaxonomyOverview {
        TaxonomyOverview {
            categories: self.categories.keys().cloned().collect(),
            cities: self.regions.keys().cloned().collect(),
            sorts: self.sorts.iter().map(|(label, _)| label.clone()).collect(),
        }
    }
}

fn read_table(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| ScoutError::Config(format!("cannot read {}: {e}", path.display())))
}
