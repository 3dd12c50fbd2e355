//! Element records and the markup description they are built from.
//!
//! # Responsibility
//! - Hold per-element markup facts (tag, id, classes, attributes).
//! - Hold the mutable presentation surface (class list, inline styles, value).
//!
//! # Invariants
//! - `node_id` is stable for the page lifetime and never reused.
//! - The class list never contains duplicates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stable identifier for every element in a document arena.
pub type NodeId = Uuid;

/// Serializable markup description used to build a `Document`.
///
/// Geometry is given in document coordinates (CSS pixels from the top of
/// the page), the way layout would report `offsetTop`/`clientHeight`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub value: Option<String>,
    pub top: f64,
    pub height: f64,
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Places the element at `top` with the given `height`.
    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

/// One element inside a `Document` arena.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub node_id: NodeId,
    pub tag: String,
    pub dom_id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    value: Option<String>,
    #[serde(skip)]
    default_value: Option<String>,
    pub offset_top: f64,
    pub height: f64,
    #[serde(skip)]
    pub(crate) parent: Option<NodeId>,
    #[serde(skip)]
    pub(crate) children: Vec<NodeId>,
}

impl Element {
    pub(crate) fn from_spec(spec: &ElementSpec, parent: Option<NodeId>) -> Self {
        let mut classes: Vec<String> = Vec::with_capacity(spec.classes.len());
        for class in &spec.classes {
            let class = class.trim();
            if !class.is_empty() && !classes.iter().any(|existing| existing == class) {
                classes.push(class.to_string());
            }
        }

        Self {
            node_id: Uuid::new_v4(),
            tag: spec.tag.trim().to_ascii_lowercase(),
            dom_id: spec.id.clone().filter(|id| !id.is_empty()),
            classes,
            attributes: spec.attributes.clone(),
            styles: BTreeMap::new(),
            value: spec.value.clone(),
            default_value: spec.value.clone(),
            offset_top: spec.top,
            height: spec.height.max(0.0),
            parent,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }

    /// Adds `class` if absent. Returns whether the list changed.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Removes `class` if present. Removing an absent class is a no-op.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|existing| existing != class);
        before != self.classes.len()
    }

    /// Flips `class` and returns whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.remove_class(class) {
            false
        } else {
            self.classes.push(class.to_string());
            true
        }
    }

    /// Adds or removes `class` so that its presence equals `present`.
    pub fn set_class(&mut self, class: &str, present: bool) {
        if present {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.dom_id.as_deref(),
            _ => self.attributes.get(name).map(String::as_str),
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if name == "id" {
            self.dom_id = Some(value);
        } else {
            self.attributes.insert(name.to_string(), value);
        }
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        self.styles.insert(property.to_string(), value.into());
    }

    pub fn styles(&self) -> &BTreeMap<String, String> {
        &self.styles
    }

    /// Current form value. Non-form elements report `None`.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// Restores the value the markup declared, like `form.reset()`.
    pub fn reset_value(&mut self) {
        self.value = self.default_value.clone();
    }

    pub fn is_form_field(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }
}
