//! Page behaviors.
//!
//! # Responsibility
//! - One module per independent reaction; none calls another.
//! - Behaviors read the document and write only `PageState`.
//!
//! # See also
//! - `state::render` for how state reaches the document.

pub mod contact_form;
pub mod fade_in;
pub mod hover;
pub mod lazy_image;
pub mod nav;
pub mod reveal;
pub mod scroll_spy;
pub mod smooth_scroll;
