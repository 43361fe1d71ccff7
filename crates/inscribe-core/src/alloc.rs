//! Collection types for Inscribe.
//!
//! Re-exports of hash collections backed by AHash. Frame attribute maps and
//! other string-keyed lookups use these instead of the std hasher.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
