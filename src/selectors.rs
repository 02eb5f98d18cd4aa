//! Shared Selectors

use once_cell::sync::Lazy;
use scraper::Selector;

/// Profile anchor that only renders for a logged-in visitor.
pub const LOGIN_USERNAME: &str = ".userinfo-container .username";

/// Ranking list container; present even when the list is empty.
pub const RANK_CONTAINER: &str = ".shop-all-list";

/// Shop name on a detail page; doubles as the page-ready marker.
pub const DETAIL_READY: &str = ".shopName";

/// One entry of the ranking list.
pub static RANK_ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".shop-all-list ul li").expect("valid rank item selector"));
