#![doc = include_str!("../README.md")]

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod log;
pub mod query;
pub mod runtime;
pub mod selectors;
pub mod session;
pub mod taxonomy;
pub mod types;

pub use api::Scout;
pub use config::Config;
pub use error::{Result, ScoutError};
pub use extract::{ShopDetail, ShopSummary};
pub use query::RankQuery;
pub use types::*;
