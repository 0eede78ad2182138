//! Tags
//!
//! Set semantics for category slugs and product types.

pub mod collection;
pub mod string;
