mod common;

use common::{click, has_class, key, mount_portfolio, node, nodes};
use folio_core::MenuState;

#[test]
fn toggle_opens_menu_and_marks_both_elements() {
    let mut page = mount_portfolio();
    let toggle = node(&page, "hamburger");
    let menu = node(&page, "navLinks");

    assert_eq!(page.state().menu, MenuState::Closed);
    click(&mut page, toggle);

    assert_eq!(page.state().menu, MenuState::Open);
    assert!(has_class(&page, toggle, "active"));
    assert!(has_class(&page, menu, "active"));
}

#[test]
fn toggling_twice_round_trips_to_closed() {
    let mut page = mount_portfolio();
    let toggle = node(&page, "hamburger");
    let menu = node(&page, "navLinks");
    let before: Vec<String> = page.document().get(menu).expect("menu").classes().to_vec();

    click(&mut page, toggle);
    click(&mut page, toggle);

    assert_eq!(page.state().menu, MenuState::Closed);
    let after: Vec<String> = page.document().get(menu).expect("menu").classes().to_vec();
    assert_eq!(before, after);
    assert!(!has_class(&page, toggle, "active"));
}

#[test]
fn clicks_inside_the_toggle_count_as_toggle_clicks() {
    let mut page = mount_portfolio();
    let toggle = node(&page, "hamburger");
    let bar = page.document().get(toggle).expect("toggle").children()[0];

    click(&mut page, bar);
    assert_eq!(page.state().menu, MenuState::Open);
}

#[test]
fn escape_closes_regardless_of_toggle_count() {
    let mut page = mount_portfolio();
    let toggle = node(&page, "hamburger");
    let menu = node(&page, "navLinks");

    for _ in 0..3 {
        click(&mut page, toggle);
    }
    assert_eq!(page.state().menu, MenuState::Open);

    let effects = key(&mut page, "Escape");
    assert!(effects.is_empty());
    assert_eq!(page.state().menu, MenuState::Closed);
    assert!(!has_class(&page, toggle, "active"));
    assert!(!has_class(&page, menu, "active"));

    key(&mut page, "Escape");
    assert_eq!(page.state().menu, MenuState::Closed);
}

#[test]
fn following_a_menu_link_closes_the_menu() {
    let mut page = mount_portfolio();
    let toggle = node(&page, "hamburger");
    let links = nodes(&page, ".nav-links a");

    click(&mut page, toggle);
    click(&mut page, links[2]);
    assert_eq!(page.state().menu, MenuState::Closed);

    // Already closed: stays closed.
    click(&mut page, links[0]);
    assert_eq!(page.state().menu, MenuState::Closed);
}

#[test]
fn other_keys_leave_the_menu_alone() {
    let mut page = mount_portfolio();
    let toggle = node(&page, "hamburger");
    click(&mut page, toggle);

    key(&mut page, "Enter");
    key(&mut page, "escape");
    assert_eq!(page.state().menu, MenuState::Open);
}
