//! DOM → record extraction
//!
//! Both record shapes are read through one selector table each and the
//! generic [`extract_fields`] helper, so a missing anchor only empties its
//! own field.

mod fields;
mod node;
mod render;
mod utils;

pub mod types;

#[cfg(test)]
mod tests;

pub use fields::{extract_fields, FieldSpec, FieldTable, Fields, Pick};
pub use node::Node;
pub use render::render_detail_markdown;
pub use types::*;
pub use utils::{decode_rating, parse_shop_id};

use crate::selectors::RANK_ITEM_SELECTOR;
use once_cell::sync::Lazy;
use scraper::Html;
use utils::absolutize;

const RANK_FIELDS: [FieldSpec; 8] = [
    FieldSpec::new("name", ".tit a h4", Pick::Text),
    FieldSpec::new("href", ".tit a", Pick::Attr("href")),
    FieldSpec::new("star", ".nebula_star .star_icon span", Pick::Attr("class")),
    FieldSpec::new("review_count", ".review-num b", Pick::Text),
    FieldSpec::new("address", ".tag-addr a span.tag", Pick::Joined),
    FieldSpec::new("img", ".pic img", Pick::Attr("src")),
    FieldSpec::new("price", ".mean-price b", Pick::Text),
    FieldSpec::new("recommend", ".recommend a.recommend-click", Pick::List),
];

const DETAIL_FIELDS: [FieldSpec; 13] = [
    FieldSpec::new("name", ".shopName", Pick::Text),
    FieldSpec::new("rating", ".star-score", Pick::Text),
    FieldSpec::new("review_count", ".reviews", Pick::Text),
    FieldSpec::new("price", ".price", Pick::Text),
    FieldSpec::new("region", ".region", Pick::Text),
    FieldSpec::new("category", ".category", Pick::Text),
    FieldSpec::new("score_text", ".scoreText", Pick::Text),
    FieldSpec::new("address", ".addressText", Pick::Text),
    FieldSpec::new("address_detail", ".desc-addr-txt", Pick::Text),
    FieldSpec::new("biz_label", ".biz-txt", Pick::Text),
    FieldSpec::new("biz_time", ".biz-time", Pick::Text),
    FieldSpec::new("tags", ".feature-txt", Pick::List),
    FieldSpec::new("dishes", ".food", Pick::List),
];

static RANK_TABLE: Lazy<FieldTable> = Lazy::new(|| FieldTable::new(&RANK_FIELDS));
static DETAIL_TABLE: Lazy<FieldTable> = Lazy::new(|| FieldTable::new(&DETAIL_FIELDS));

/// Read every list entry of a ranking page. `base` resolves relative links.
pub fn extract_ranking(html: &str, base: &str) -> Vec<ShopSummary> {
    let doc = Html::parse_document(html);
    doc.root_element()
        .find_all(&RANK_ITEM_SELECTOR)
        .iter()
        .map(|item| summary_from(&extract_fields(item, &RANK_TABLE), base))
        .collect()
}

fn summary_from(f: &Fields, base: &str) -> ShopSummary {
    let href = f.text("href");
    ShopSummary {
        shop_id: parse_shop_id(&href),
        name: f.text("name"),
        rating: decode_rating(&f.text("star")),
        review_count: f.text("review_count"),
        address: f.text("address"),
        url: absolutize(&href, base),
        img: f.text("img"),
        price: f.text("price"),
        recommend: f.list("recommend"),
    }
}

/// Read a shop detail page and render its markdown block.
pub fn extract_detail(html: &str, shop_id: &str) -> ShopDetail {
    let doc = Html::parse_document(html);
    let f = extract_fields(&doc.root_element(), &DETAIL_TABLE);

    let business_hours = match (f.found("biz_label"), f.found("biz_time")) {
        (Some(label), Some(time)) => format!("{label} {time}"),
        _ => String::new(),
    };

    let mut detail = ShopDetail {
        shop_id: shop_id.to_string(),
        name: f.text("name"),
        rating: f.text("rating"),
        review_count: f.text("review_count"),
        price: f.text("price"),
        region: f.text("region"),
        category: f.text("category"),
        score_text: f.text("score_text"),
        address: f.text("address"),
        address_detail: f.text("address_detail"),
        business_hours,
        tags: f.list("tags"),
        recommend_dishes: f.list("dishes"),
        md: String::new(),
    };
    detail.md = render_detail_markdown(&detail);
    detail
}
