use scraper::Selector;
use std::collections::BTreeMap;

use super::node::Node;

/// How a field is read from the nodes its selector matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// Text of the first match.
    Text,
    /// Attribute of the first match.
    Attr(&'static str),
    /// Text of every match, in document order.
    List,
    /// Text of every match joined by single spaces.
    Joined,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub selector: &'static str,
    pub pick: Pick,
}

impl FieldSpec {
    pub const fn new(key: &'static str, selector: &'static str, pick: Pick) -> Self {
        Self { key, selector, pick }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    /// `None` when the anchor was absent.
    Single(Option<String>),
    Many(Vec<String>),
}

/// Extracted values keyed by [`FieldSpec::key`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(BTreeMap<&'static str, FieldValue>);

impl Fields {
    /// Value of a single-valued field, empty when absent.
    pub fn text(&self, key: &str) -> String {
        self.found(key).unwrap_or_default().to_string()
    }

    /// Value of a single-valued field only if its anchor matched.
    pub fn found(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(FieldValue::Single(v)) => v.as_deref(),
            _ => None,
        }
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        match self.0.get(key) {
            Some(FieldValue::Many(v)) => v.clone(),
            _ => Vec::new(),
        }
    }
}

/// A field table with every selector parsed once. An unparsable selector is
/// kept as `None` and behaves like one that matches nothing.
#[derive(Debug)]
pub struct FieldTable(Vec<(FieldSpec, Option<Selector>)>);

impl FieldTable {
    pub fn new(specs: &[FieldSpec]) -> Self {
        Self(
            specs
                .iter()
                .map(|spec| (*spec, Selector::parse(spec.selector).ok()))
                .collect(),
        )
    }

    /// Keys whose selector failed to parse.
    pub fn unparsed(&self) -> Vec<&'static str> {
        self.0
            .iter()
            .filter(|(_, sel)| sel.is_none())
            .map(|(spec, _)| spec.key)
            .collect()
    }
}

/// Read every field of `table` from `node`; each one independently falls back
/// to empty.
pub fn extract_fields<N: Node>(node: &N, table: &FieldTable) -> Fields {
    let mut out = BTreeMap::new();
    for (spec, selector) in &table.0 {
        let value = match (spec.pick, selector) {
            (Pick::Text, Some(sel)) => FieldValue::Single(node.find_first(sel).map(|n| n.inner_text())),
            (Pick::Attr(name), Some(sel)) => {
                FieldValue::Single(node.find_first(sel).and_then(|n| n.attribute(name)))
            }
            (Pick::List, Some(sel)) => {
                FieldValue::Many(node.find_all(sel).iter().map(Node::inner_text).collect())
            }
            (Pick::Joined, Some(sel)) => {
                let parts: Vec<String> = node
                    .find_all(sel)
                    .iter()
                    .map(Node::inner_text)
                    .filter(|t| !t.is_empty())
                    .collect();
                FieldValue::Single(Some(parts.join(" ")))
            }
            (Pick::List, None) => FieldValue::Many(Vec::new()),
            (_, None) => FieldValue::Single(None),
        };
        out.insert(spec.key, value);
    }
    Fields(out)
}
