//! Matchers deciding what gets rewritten.
//!
//! - [`UnitPattern`] finds numeric literals carrying the source unit
//! - [`PropList`] filters declarations by property name
//! - [`WildcardPattern`] is the compiled form of a prop list token

mod prop_list;
mod unit;
mod wildcard;

pub use prop_list::PropList;
pub use unit::{UnitMatch, UnitPattern};
pub use wildcard::{WildcardKind, WildcardPattern};
