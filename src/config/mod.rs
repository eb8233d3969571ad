mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ApiConfig, CacheConfig, Config, ListingKind, DEFAULT_MAX_AGE_MINS};
