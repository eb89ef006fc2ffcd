//! Monthly catalog resolution and range selection for `ccnews`.
//!
//! A catalog is the gzip-compressed list of capture files published for one
//! year-month. [`CatalogResolver`] fetches, parses and caches catalogs;
//! [`parse_id_range`] and [`select_files`] turn a user's ID request into a
//! contiguous slice of the catalog.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod cache;
mod error;
mod parsing;
mod resolver;
mod selection;
mod table;
mod url;

// ============================================================================
// Public API
// ============================================================================

pub use cache::CatalogCache;
pub use error::{CatalogError, CatalogResult};
pub use parsing::{PathParseError, parse_catalog_lines, parse_file_path};
pub use resolver::CatalogResolver;
pub use selection::{RangeError, parse_id_range, select_files};
pub use table::render_catalog_table;
pub use url::{catalog_url, file_url};

// Silence unused dev-dependency warnings
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use bytes as _;
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio as _;
