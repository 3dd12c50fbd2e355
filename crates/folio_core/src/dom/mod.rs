//! In-memory page document.
//!
//! # Responsibility
//! - Model the markup contract the page behaviors bind to.
//! - Expose class/style/value mutation as the only outward surface.
//!
//! # Invariants
//! - Elements are stored in document (pre-order) order.
//! - Structure is fixed after construction; only presentation mutates.

pub mod document;
pub mod element;
pub mod selector;

pub use document::Document;
pub use element::{Element, ElementSpec, NodeId};
pub use selector::{Selector, SelectorError};
