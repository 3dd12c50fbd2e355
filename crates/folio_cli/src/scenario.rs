//! Scenario replay for portfolio page sessions.
//!
//! # Responsibility
//! - Load a page description plus scripted visitor steps from JSON.
//! - Replay steps against `PortfolioPage` and summarize what changed.
//!
//! # Invariants
//! - Steps run strictly in file order.
//! - A step addressing a missing element aborts the replay with context.

use anyhow::{anyhow, Context, Result};
use folio_core::{
    Document, Effect, ElementSpec, HostCapabilities, LazyImageStrategy, MenuState, NodeId,
    PageConfig, PageEvent, PortfolioPage, Viewport, Visibility,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Element address inside a scenario: a selector, optionally indexed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TargetRef {
    Selector(String),
    Indexed {
        selector: String,
        #[serde(default)]
        index: usize,
    },
}

impl TargetRef {
    fn resolve(&self, page: &PortfolioPage) -> Result<NodeId> {
        let (selector, index) = match self {
            Self::Selector(selector) => (selector.as_str(), 0),
            Self::Indexed { selector, index } => (selector.as_str(), *index),
        };
        let matches = page
            .select(selector)
            .with_context(|| format!("invalid target selector `{selector}`"))?;
        matches.get(index).copied().ok_or_else(|| {
            anyhow!(
                "target `{selector}` index {index} not found ({} matches)",
                matches.len()
            )
        })
    }
}

/// One scripted visitor or host action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Load,
    Scroll { y: f64 },
    Resize { width: f64, height: f64 },
    Click { target: TargetRef },
    Key { key: String },
    Hover { target: TargetRef },
    Unhover { target: TargetRef },
    Type { target: TargetRef, value: String },
    Submit { target: TargetRef },
    Advance { ms: u64 },
}

impl Step {
    fn label(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Scroll { .. } => "scroll",
            Self::Resize { .. } => "resize",
            Self::Click { .. } => "click",
            Self::Key { .. } => "key",
            Self::Hover { .. } => "hover",
            Self::Unhover { .. } => "unhover",
            Self::Type { .. } => "type",
            Self::Submit { .. } => "submit",
            Self::Advance { .. } => "advance",
        }
    }

    fn to_event(&self, page: &PortfolioPage) -> Result<PageEvent> {
        Ok(match self {
            Self::Load => PageEvent::Load,
            Self::Scroll { y } => PageEvent::Scroll { scroll_y: *y },
            Self::Resize { width, height } => PageEvent::Resize {
                width: *width,
                height: *height,
            },
            Self::Click { target } => PageEvent::Click {
                target: target.resolve(page)?,
            },
            Self::Key { key } => PageEvent::KeyDown { key: key.clone() },
            Self::Hover { target } => PageEvent::MouseEnter {
                target: target.resolve(page)?,
            },
            Self::Unhover { target } => PageEvent::MouseLeave {
                target: target.resolve(page)?,
            },
            Self::Type { target, value } => PageEvent::Input {
                target: target.resolve(page)?,
                value: value.clone(),
            },
            Self::Submit { target } => PageEvent::Submit {
                target: target.resolve(page)?,
            },
            Self::Advance { ms } => PageEvent::AdvanceTime { ms: *ms },
        })
    }
}

/// Scenario file contents.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub markup: ElementSpec,
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub capabilities: HostCapabilities,
    #[serde(default)]
    pub config: PageConfig,
    /// Land every requested scroll immediately, as if the animation finished.
    #[serde(default)]
    pub follow_scroll_requests: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub step: &'static str,
    pub effects: Vec<Effect>,
}

/// Presentation of one element after replay.
#[derive(Debug, Clone, Serialize)]
pub struct ElementSnapshot {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub steps: Vec<StepReport>,
    pub elapsed_ms: u64,
    pub scroll_y: f64,
    pub menu: MenuState,
    pub active_section: Option<String>,
    pub back_to_top: Visibility,
    pub lazy_images: LazyImageStrategy,
    pub elements: Vec<ElementSnapshot>,
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario `{}`", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse scenario `{}`", path.display()))
}

/// Mounts the scenario page and replays every step.
pub fn run(scenario: &Scenario) -> Result<Report> {
    let mut page = PortfolioPage::mount(
        Document::from_spec(&scenario.markup),
        scenario.viewport.unwrap_or_default(),
        scenario.capabilities,
        scenario.config,
    )
    .context("failed to mount scenario markup")?;

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        let event = step
            .to_event(&page)
            .with_context(|| format!("step {index} ({})", step.label()))?;
        let effects = page.dispatch(event);
        debug!(
            "event=step_replayed module=scenario status=ok index={index} step={} effects={}",
            step.label(),
            effects.len()
        );

        if scenario.follow_scroll_requests {
            for effect in &effects {
                if let Effect::ScrollTo(request) = effect {
                    page.dispatch(PageEvent::Scroll {
                        scroll_y: request.top,
                    });
                }
            }
        }

        steps.push(StepReport {
            index,
            step: step.label(),
            effects,
        });
    }

    info!(
        "event=scenario_complete module=scenario status=ok steps={} elapsed_ms={}",
        steps.len(),
        page.now_ms()
    );
    Ok(snapshot(&page, steps))
}

fn snapshot(page: &PortfolioPage, steps: Vec<StepReport>) -> Report {
    let elements = page
        .document()
        .iter()
        .filter(|element| {
            element.dom_id.is_some() || !element.classes().is_empty() || !element.styles().is_empty()
        })
        .map(|element| ElementSnapshot {
            tag: element.tag.clone(),
            id: element.dom_id.clone(),
            classes: element.classes().to_vec(),
            styles: element.styles().clone(),
            src: element.attribute("src").map(str::to_string),
            value: element.value().map(str::to_string),
        })
        .collect();

    Report {
        steps,
        elapsed_ms: page.now_ms(),
        scroll_y: page.viewport().scroll_y,
        menu: page.state().menu,
        active_section: page.state().active_section.clone(),
        back_to_top: page.state().back_to_top,
        lazy_images: page.lazy_image_strategy(),
        elements,
    }
}

#[cfg(test)]
mod tests {
    use super::{load_scenario, run, Scenario, Step, TargetRef};
    use folio_core::{Effect, MenuState, Visibility};
    use std::io::Write;

    fn scenario_json(steps: serde_json::Value, follow: bool) -> serde_json::Value {
        serde_json::json!({
            "markup": {
                "tag": "body",
                "children": [
                    { "tag": "div", "id": "hamburger" },
                    { "tag": "ul", "id": "navLinks", "classes": ["nav-links"], "children": [
                        { "tag": "a", "attributes": { "href": "#about" } }
                    ]},
                    { "tag": "section", "id": "home", "top": 0.0, "height": 800.0 },
                    { "tag": "section", "id": "about", "classes": ["about"], "top": 800.0, "height": 600.0 },
                    { "tag": "button", "id": "backToTop" },
                    { "tag": "form", "id": "contactForm", "children": [
                        { "tag": "input", "id": "name", "value": "" },
                        { "tag": "input", "id": "email", "value": "" },
                        { "tag": "textarea", "id": "message", "value": "" }
                    ]}
                ]
            },
            "viewport": { "scroll_y": 0.0, "width": 1280.0, "height": 800.0 },
            "follow_scroll_requests": follow,
            "steps": steps
        })
    }

    #[test]
    fn steps_deserialize_from_tagged_json() {
        let steps: Vec<Step> = serde_json::from_value(serde_json::json!([
            "load",
            { "scroll": { "y": 450.0 } },
            { "click": { "target": "#hamburger" } },
            { "click": { "target": { "selector": ".nav-links a", "index": 0 } } },
            { "advance": { "ms": 100 } }
        ]))
        .expect("steps should deserialize");

        assert_eq!(steps[0], Step::Load);
        assert_eq!(
            steps[2],
            Step::Click {
                target: TargetRef::Selector("#hamburger".to_string())
            }
        );
        assert_eq!(
            steps[3],
            Step::Click {
                target: TargetRef::Indexed {
                    selector: ".nav-links a".to_string(),
                    index: 0
                }
            }
        );
    }

    #[test]
    fn followed_scroll_requests_land_on_the_target() {
        let json = scenario_json(
            serde_json::json!([
                { "click": { "target": "#hamburger" } },
                { "click": { "target": ".nav-links a" } }
            ]),
            true,
        );
        let scenario: Scenario = serde_json::from_value(json).expect("scenario parses");
        let report = run(&scenario).expect("scenario runs");

        assert_eq!(report.menu, MenuState::Closed);
        assert_eq!(report.scroll_y, 800.0);
        assert_eq!(report.active_section.as_deref(), Some("about"));
        assert_eq!(report.back_to_top, Visibility::Shown);
        assert!(report.steps[1].effects.contains(&Effect::PreventDefault));

        let about = report
            .elements
            .iter()
            .find(|element| element.id.as_deref() == Some("about"))
            .expect("about snapshot");
        assert!(about.classes.iter().any(|class| class == "slide-in-up"));
    }

    #[test]
    fn missing_target_reports_step_context() {
        let json = scenario_json(
            serde_json::json!([{ "click": { "target": "#nowhere" } }]),
            false,
        );
        let scenario: Scenario = serde_json::from_value(json).expect("scenario parses");
        let err = run(&scenario).expect_err("missing target must fail");
        assert!(format!("{err:#}").contains("step 0 (click)"));
    }

    #[test]
    fn load_scenario_reads_files() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let json = scenario_json(serde_json::json!(["load"]), false);
        write!(file, "{json}").expect("write scenario");

        let scenario = load_scenario(file.path()).expect("scenario loads");
        assert_eq!(scenario.steps, [Step::Load]);
        assert!(!scenario.follow_scroll_requests);
    }

    #[test]
    fn load_scenario_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write scenario");
        let err = load_scenario(file.path()).expect_err("bad json must fail");
        assert!(err.to_string().contains("failed to parse scenario"));
    }
}
