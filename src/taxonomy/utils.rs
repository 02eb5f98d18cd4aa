use super::types::{CategoryMap, RegionMap};

fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with("//")
}

/// Parse the tab-delimited category table: `name<TAB>path`.
pub(super) fn parse_category_lines(text: &str) -> CategoryMap {
    let mut menu = CategoryMap::new();
    for line in text.lines() {
        let line = line.trim();
        if is_skippable(line) {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        if let [name, path] = parts.as_slice() {
            menu.insert(name.to_string(), path.to_string());
        }
    }
    menu
}

/// Parse the whitespace-delimited region table: `city name code`.
pub(super) fn parse_region_lines(text: &str) -> RegionMap {
    let mut regions = RegionMap::new();
    for line in text.lines() {
        let line = line.trim();
        if is_skippable(line) {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if let [city, name, code] = parts.as_slice() {
            regions
                .entry(city.to_lowercase())
                .or_default()
                .insert(name.to_string(), code.to_string());
        }
    }
    regions
}
