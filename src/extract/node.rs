use scraper::{ElementRef, Selector};

use super::utils::clean_text;

/// Read-only view of a document node. Lookups never fail: a miss is `None`,
/// an empty `Vec`, or an empty string.
pub trait Node: Sized {
    fn find_first(&self, selector: &Selector) -> Option<Self>;
    fn find_all(&self, selector: &Selector) -> Vec<Self>;
    fn attribute(&self, name: &str) -> Option<String>;
    /// Descendant text with the ends trimmed.
    fn inner_text(&self) -> String;
}

impl<'a> Node for ElementRef<'a> {
    fn find_first(&self, selector: &Selector) -> Option<Self> {
        self.select(selector).next()
    }

    fn find_all(&self, selector: &Selector) -> Vec<Self> {
        self.select(selector).collect()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_string)
    }

    fn inner_text(&self) -> String {
        clean_text(&self.text().collect::<String>())
    }
}
