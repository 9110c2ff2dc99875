//! Client Module
//!
//! Consumers of the cache: a fetch-through HTTP client and a browsing
//! session that carries pagination state.

mod fetcher;
mod session;

pub use fetcher::{Fetcher, RefreshPolicy};
pub use session::{Cursor, Session, LOCATION_AREA_PATH};
