//! Response cache for upstream weather payloads.
//!
//! Entries expire after a fixed TTL and are never swept; a stale entry is
//! simply ignored until the next successful fetch for its key replaces it.

mod cache_interface;
mod memory_cache;

pub use cache_interface::WeatherCache;
pub use memory_cache::{CacheEntry, MemoryWeatherCache, CACHE_TTL};
