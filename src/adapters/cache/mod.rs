//! In-process cache adapters.

pub mod classification_cache;

pub use classification_cache::MokaClassificationCache;
