//! Flavorgraph Search - Matching free text against the ingredient set
//!
//! Provides the deterministic local matcher, the query decomposer, the
//! permissive text-to-node heuristics used on provider answers, and an
//! optional fuzzy suggester (nucleo).

pub mod decompose;
pub mod local;
pub mod text;
pub mod traits;

#[cfg(feature = "fuzzy")]
pub mod fuzzy;

pub use decompose::QueryDecomposer;
pub use local::{LocalMatcher, MatchTier};
pub use text::TextMatcher;
pub use traits::NodeMatcher;

#[cfg(feature = "fuzzy")]
pub use fuzzy::FuzzySuggester;
