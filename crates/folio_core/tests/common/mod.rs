#![allow(dead_code)]

use folio_core::{
    Document, ElementSpec, HostCapabilities, NodeId, PageConfig, PageEvent, PortfolioPage,
    Viewport,
};

pub const VIEWPORT_WIDTH: f64 = 1280.0;
pub const VIEWPORT_HEIGHT: f64 = 800.0;

fn nav_link(fragment: &str) -> ElementSpec {
    ElementSpec::new("li").child(ElementSpec::new("a").with_attribute("href", format!("#{fragment}")))
}

fn skill_category() -> ElementSpec {
    ElementSpec::new("div")
        .with_class("skill-category")
        .at(1500.0, 200.0)
        .children([
            ElementSpec::new("span").with_class("skill-tag").at(1550.0, 30.0),
            ElementSpec::new("span").with_class("skill-tag").at(1550.0, 30.0),
        ])
}

/// Single-page portfolio markup with stable geometry.
///
/// Sections: home 0, about 800, skills 1400, projects 2100, contact 3000.
pub fn portfolio_markup() -> ElementSpec {
    ElementSpec::new("body").children([
        ElementSpec::new("nav").with_class("navbar").at(0.0, 70.0).children([
            ElementSpec::new("div")
                .with_id("hamburger")
                .with_class("hamburger")
                .children([ElementSpec::new("span"), ElementSpec::new("span")]),
            ElementSpec::new("ul")
                .with_id("navLinks")
                .with_class("nav-links")
                .children(["home", "about", "skills", "projects", "contact"].map(nav_link)),
        ]),
        ElementSpec::new("section")
            .with_id("home")
            .with_class("hero")
            .at(0.0, 800.0)
            .children([
                ElementSpec::new("h1").with_class("fade-in").at(200.0, 60.0),
                ElementSpec::new("p").with_class("fade-in").at(280.0, 40.0),
                ElementSpec::new("a")
                    .with_class("btn")
                    .with_class("fade-in")
                    .with_attribute("href", "#contact")
                    .at(340.0, 50.0),
            ]),
        ElementSpec::new("section")
            .with_id("about")
            .with_class("about")
            .at(800.0, 600.0),
        ElementSpec::new("section")
            .with_id("skills")
            .with_class("skills")
            .at(1400.0, 700.0)
            .children([skill_category(), skill_category(), skill_category()]),
        ElementSpec::new("section")
            .with_id("projects")
            .with_class("projects")
            .at(2100.0, 900.0)
            .children([
                ElementSpec::new("div")
                    .with_class("project-card")
                    .at(2200.0, 300.0)
                    .child(
                        ElementSpec::new("img")
                            .with_attribute("data-src", "img/project-one.png")
                            .at(2200.0, 200.0),
                    ),
                ElementSpec::new("div")
                    .with_class("project-card")
                    .at(2550.0, 300.0),
            ]),
        ElementSpec::new("section")
            .with_id("contact")
            .with_class("contact")
            .at(3000.0, 700.0)
            .child(
                ElementSpec::new("form")
                    .with_id("contactForm")
                    .at(3100.0, 500.0)
                    .children([
                        ElementSpec::new("input").with_id("name").with_value(""),
                        ElementSpec::new("input").with_id("email").with_value(""),
                        ElementSpec::new("textarea").with_id("message").with_value(""),
                    ]),
            ),
        ElementSpec::new("button").with_id("backToTop"),
    ])
}

pub fn mount_with(markup: &ElementSpec, capabilities: HostCapabilities, config: PageConfig) -> PortfolioPage {
    PortfolioPage::mount(
        Document::from_spec(markup),
        Viewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        capabilities,
        config,
    )
    .expect("fixture markup should mount")
}

pub fn mount_portfolio() -> PortfolioPage {
    mount_with(
        &portfolio_markup(),
        HostCapabilities::default(),
        PageConfig::default(),
    )
}

pub fn node(page: &PortfolioPage, dom_id: &str) -> NodeId {
    page.node(dom_id)
        .unwrap_or_else(|| panic!("fixture should contain #{dom_id}"))
}

pub fn nodes(page: &PortfolioPage, selector: &str) -> Vec<NodeId> {
    page.select(selector).expect("fixture selector should parse")
}

pub fn has_class(page: &PortfolioPage, node: NodeId, class: &str) -> bool {
    page.document()
        .get(node)
        .expect("node should exist")
        .has_class(class)
}

pub fn value_of(page: &PortfolioPage, dom_id: &str) -> String {
    let node = node(page, dom_id);
    page.document()
        .get(node)
        .and_then(|element| element.value())
        .unwrap_or_default()
        .to_string()
}

pub fn type_into(page: &mut PortfolioPage, dom_id: &str, value: &str) {
    let target = node(page, dom_id);
    page.dispatch(PageEvent::Input {
        target,
        value: value.to_string(),
    });
}

pub fn scroll_to(page: &mut PortfolioPage, scroll_y: f64) {
    page.dispatch(PageEvent::Scroll { scroll_y });
}

pub fn click(page: &mut PortfolioPage, target: NodeId) -> Vec<folio_core::Effect> {
    page.dispatch(PageEvent::Click { target })
}

pub fn key(page: &mut PortfolioPage, key: &str) -> Vec<folio_core::Effect> {
    page.dispatch(PageEvent::KeyDown {
        key: key.to_string(),
    })
}
