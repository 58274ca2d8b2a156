//! Domain logic - pure version rules independent of git operations

pub mod bump;
pub mod plan;
pub mod version;

pub use bump::{next, BumpStrategy};
pub use plan::Plan;
pub use version::{
    compare, current_of, current_of_with_prefix, parse, parse_with_prefix, SemanticVersion,
};
