use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label of the implicit "smart ranking" order (no URL fragment).
pub const DEFAULT_SORT_LABEL: &str = "智能排序";

/// Built-in sort labels and the URL fragment each one appends.
pub const SORT_TABLE: [(&str, &str); 10] = [
    (DEFAULT_SORT_LABEL, ""),
    ("好评优先", "o3"),
    ("人气优先", "o2"),
    ("口味优先", "o4"),
    ("评价最多", "o11"),
    ("环境最佳", "o5"),
    ("服务最佳", "o6"),
    ("预订优先", "o13"),
    ("人均最高", "o9"),
    ("人均最低", "o8"),
];

/// Category display name → URL path fragment (e.g. `火锅` → `/ch10/g110`).
pub type CategoryMap = BTreeMap<String, String>;

/// Lower-cased city → region display name → region code (e.g. `r2580`).
pub type RegionMap = BTreeMap<String, BTreeMap<String, String>>;

/// Immutable lookup tables the query builder validates against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub categories: CategoryMap,
    pub regions: RegionMap,
    pub sorts: Vec<(String, String)>,
}

/// Listing view used by the `taxonomy` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyOverview {
    pub categories: Vec<String>,
    pub cities: Vec<String>,
    pub sorts: Vec<String>,
}
