use serde::{Deserialize, Serialize};

/// One entry of a category ranking page.
///
/// Every field is always present; a missing DOM anchor leaves it empty.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ShopSummary {
    pub shop_id: String,
    pub name: String,
    /// Decoded star rating, `"0"` or one decimal between `0.0` and `5.0`.
    pub rating: String,
    /// As displayed; not necessarily a clean number.
    pub review_count: String,
    pub address: String,
    pub url: String,
    pub img: String,
    pub price: String,
    #[serde(default)]
    pub recommend: Vec<String>,
}

/// Everything read off a shop detail page, plus its markdown rendering.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ShopDetail {
    pub shop_id: String,
    pub name: String,
    pub rating: String,
    pub review_count: String,
    pub price: String,
    pub region: String,
    pub category: String,
    pub score_text: String,
    pub address: String,
    pub address_detail: String,
    pub business_hours: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub recommend_dishes: Vec<String>,
    pub md: String,
}
