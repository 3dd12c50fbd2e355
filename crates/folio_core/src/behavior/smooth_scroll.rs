//! Same-page anchor routing to animated scroll requests.

use crate::dom::Document;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Smooth,
}

/// Request for the host to scroll the window. The host owns the animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

impl ScrollRequest {
    pub fn smooth_to(top: f64) -> Self {
        Self {
            top,
            behavior: ScrollBehavior::Smooth,
        }
    }

    pub fn to_page_top() -> Self {
        Self::smooth_to(0.0)
    }
}

/// Fragment identifier of a same-page `href`, without the leading `#`.
///
/// Returns `None` for non-fragment hrefs and for a bare `#`.
pub fn fragment_of(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|fragment| !fragment.is_empty())
}

/// Resolves `href` to a scroll request aligning the target's top with the
/// viewport top. `None` when no element carries the fragment id.
pub fn resolve_anchor(document: &Document, href: &str) -> Option<ScrollRequest> {
    let fragment = fragment_of(href)?;
    document
        .element_by_id(fragment)
        .map(|element| ScrollRequest::smooth_to(element.offset_top))
}

#[cfg(test)]
mod tests {
    use super::{fragment_of, resolve_anchor, ScrollBehavior};
    use crate::dom::{Document, ElementSpec};

    #[test]
    fn fragment_requires_hash_and_name() {
        assert_eq!(fragment_of("#about"), Some("about"));
        assert_eq!(fragment_of("#"), None);
        assert_eq!(fragment_of("about"), None);
        assert_eq!(fragment_of("https://example.com/#about"), None);
    }

    #[test]
    fn resolves_existing_targets_only() {
        let document = Document::from_spec(
            &ElementSpec::new("body")
                .child(ElementSpec::new("section").with_id("projects").at(2100.0, 900.0)),
        );

        let request = resolve_anchor(&document, "#projects").expect("target exists");
        assert_eq!(request.top, 2100.0);
        assert_eq!(request.behavior, ScrollBehavior::Smooth);

        assert!(resolve_anchor(&document, "#missing").is_none());
    }
}
