//! URL construction for ranking and detail pages
//!
//! Pure: no I/O, deterministic for a given [`Taxonomy`]. Nothing here touches
//! the browser, so a validation failure never has side effects.


use crate::error::{Result, ScoutError};
use crate::taxonomy::Taxonomy;
use serde::{Deserialize, Serialize};

/// Inputs of the category-rank operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankQuery {
    pub city: String,
    pub category: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub sort: String,
}

impl RankQuery {
    pub fn new(city: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }
}

/// A validated ranking target.
#[derive(Debug, Clone, PartialEq)]
pub struct RankTarget {
    pub url: String,
    pub sort_label: String,
}

/// Validate `query` and compose
/// `<base>/<city><category path><region code?><sort code?>`.
///
/// The fragment order is significant to the site and must not change.
pub fn build_rank_url(base: &str, taxonomy: &Taxonomy, query: &RankQuery) -> Result<RankTarget> {
    let category_path = taxonomy
        .category_path(&query.category)
        .ok_or_else(|| ScoutError::UnknownCategory(query.category.clone()))?;

    let city = query.city.trim().to_lowercase();
    let regions = taxonomy
        .city_regions(&city)
        .ok_or_else(|| ScoutError::UnsupportedCity(query.city.clone()))?;

    let region_code = if query.region.is_empty() {
        ""
    } else {
        regions
            .get(&query.region)
            .map(String::as_str)
            .ok_or_else(|| ScoutError::UnknownRegion {
                city: query.city.clone(),
                region: query.region.clone(),
            })?
    };

    let (sort_label, sort_code) = taxonomy
        .resolve_sort(&query.sort)
        .ok_or_else(|| ScoutError::UnknownSort(query.sort.clone()))?;

    let url = format!(
        "{}/{city}{category_path}{region_code}{sort_code}",
        base.trim_end_matches('/')
    );
    Ok(RankTarget {
        url,
        sort_label: sort_label.to_string(),
    })
}

/// `<base>/shop/<id>`; ids must be a single non-empty path segment.
pub fn build_shop_url(base: &str, shop_id: &str) -> Result<String> {
    let id = shop_id.trim();
    if id.is_empty() || id.contains(['/', '?', '#']) || id.chars().any(char::is_whitespace) {
        return Err(ScoutError::InvalidShopId(shop_id.to_string()));
    }
    Ok(format!("{}/shop/{id}", base.trim_end_matches('/')))
}
