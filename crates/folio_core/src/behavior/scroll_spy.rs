//! Scroll-position reactor: current section and back-to-top visibility.
//!
//! # Invariants
//! - The current section is the last one in document order whose top minus
//!   the lookahead is at or above the scroll position.
//! - A qualifying section without an id clears the current section.
//! - Back-to-top shows strictly beyond its threshold.

use crate::dom::{Document, NodeId};
use crate::state::{PageState, Visibility};

/// One section as seen by the reactor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionOffset<'a> {
    pub id: Option<&'a str>,
    pub offset_top: f64,
}

/// Id of the section the reader has most recently scrolled past.
pub fn current_section<'a, I>(sections: I, scroll_y: f64, lookahead: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = SectionOffset<'a>>,
{
    let mut current = None;
    for section in sections {
        if scroll_y >= section.offset_top - lookahead {
            current = section.id;
        }
    }
    current
}

pub fn back_to_top_visibility(scroll_y: f64, threshold: f64) -> Visibility {
    if scroll_y > threshold {
        Visibility::Shown
    } else {
        Visibility::Hidden
    }
}

/// Recomputes scroll-derived state for `scroll_y`.
pub fn react(
    state: &mut PageState,
    document: &Document,
    sections: &[NodeId],
    scroll_y: f64,
    lookahead: f64,
    back_to_top_threshold: f64,
) {
    let offsets = sections.iter().filter_map(|node| {
        document.get(*node).map(|element| SectionOffset {
            id: element.dom_id.as_deref(),
            offset_top: element.offset_top,
        })
    });
    state.active_section = current_section(offsets, scroll_y, lookahead).map(str::to_string);
    state.back_to_top = back_to_top_visibility(scroll_y, back_to_top_threshold);
}

#[cfg(test)]
mod tests {
    use super::{back_to_top_visibility, current_section, SectionOffset};
    use crate::state::Visibility;

    fn sections() -> Vec<SectionOffset<'static>> {
        vec![
            SectionOffset { id: Some("home"), offset_top: 0.0 },
            SectionOffset { id: Some("about"), offset_top: 800.0 },
            SectionOffset { id: Some("skills"), offset_top: 1400.0 },
        ]
    }

    #[test]
    fn picks_last_section_scrolled_past() {
        assert_eq!(current_section(sections(), 0.0, 200.0), Some("home"));
        assert_eq!(current_section(sections(), 599.0, 200.0), Some("home"));
        assert_eq!(current_section(sections(), 600.0, 200.0), Some("about"));
        assert_eq!(current_section(sections(), 5000.0, 200.0), Some("skills"));
    }

    #[test]
    fn no_section_qualifies_above_the_first() {
        let later = vec![SectionOffset { id: Some("about"), offset_top: 800.0 }];
        assert_eq!(current_section(later, 100.0, 200.0), None);
    }

    #[test]
    fn unnamed_section_clears_current() {
        let mut list = sections();
        list.push(SectionOffset { id: None, offset_top: 2000.0 });
        assert_eq!(current_section(list, 2000.0, 200.0), None);
    }

    #[test]
    fn selection_matches_brute_force_for_all_positions() {
        let list = sections();
        for position in (0..3000).step_by(25) {
            let scroll_y = f64::from(position);
            let expected = list
                .iter()
                .filter(|section| section.offset_top - 200.0 <= scroll_y)
                .last()
                .and_then(|section| section.id);
            assert_eq!(
                current_section(list.clone(), scroll_y, 200.0),
                expected,
                "scroll_y={scroll_y}"
            );
        }
    }

    #[test]
    fn back_to_top_threshold_is_exclusive() {
        assert_eq!(back_to_top_visibility(300.0, 300.0), Visibility::Hidden);
        assert_eq!(back_to_top_visibility(300.5, 300.0), Visibility::Shown);
    }
}
