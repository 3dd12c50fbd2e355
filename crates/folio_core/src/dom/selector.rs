//! Minimal CSS selector subset used to bind behaviors to markup.
//!
//! # Responsibility
//! - Parse the selector forms the page markup contract relies on.
//! - Match parsed selectors against document elements.
//!
//! Supported grammar:
//! - type (`a`), universal (`*`), id (`#x`), class (`.x`)
//! - attribute presence (`[data-src]`), equality (`[href="#top"]`)
//!   and prefix (`[href^="#"]`)
//! - compound forms (`img.lazy[data-src]`)
//! - descendant combinator (whitespace) and selector lists (`,`)

use crate::dom::document::Document;
use crate::dom::element::{Element, NodeId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Selector parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    Empty,
    UnexpectedChar { selector: String, found: char },
    UnterminatedAttribute(String),
    InvalidAttribute(String),
}

impl Display for SelectorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "selector must not be empty"),
            Self::UnexpectedChar { selector, found } => {
                write!(f, "unexpected `{found}` in selector `{selector}`")
            }
            Self::UnterminatedAttribute(selector) => {
                write!(f, "unterminated attribute block in selector `{selector}`")
            }
            Self::InvalidAttribute(selector) => {
                write!(f, "invalid attribute block in selector `{selector}`")
            }
        }
    }
}

impl Error for SelectorError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttributeMatch {
    Present(String),
    Equals(String, String),
    Prefix(String, String),
}

impl AttributeMatch {
    fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Present(name) => element.has_attribute(name),
            Self::Equals(name, value) => element.attribute(name) == Some(value.as_str()),
            Self::Prefix(name, prefix) => element
                .attribute(name)
                .is_some_and(|value| value.starts_with(prefix.as_str())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatch>,
}

impl Compound {
    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if element.tag != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.dom_id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| element.has_class(class))
            && self.attributes.iter().all(|attr| attr.matches(element))
    }
}

/// One descendant chain; the last compound is the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    compounds: Vec<Compound>,
}

impl Complex {
    fn matches(&self, document: &Document, node: NodeId) -> bool {
        let Some((subject, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        let Some(element) = document.get(node) else {
            return false;
        };
        if !subject.matches(element) {
            return false;
        }

        // Right-to-left greedy walk is exact when every combinator is descendant.
        let mut remaining = ancestors.len();
        for ancestor in document.ancestors(node) {
            if remaining == 0 {
                break;
            }
            if ancestors[remaining - 1].matches(ancestor) {
                remaining -= 1;
            }
        }
        remaining == 0
    }
}

/// Parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Complex>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut alternatives = Vec::new();
        for part in split_top_level(trimmed, |ch| ch == ',')? {
            let mut compounds = Vec::new();
            for token in split_top_level(part, char::is_whitespace)? {
                compounds.push(parse_compound(token, trimmed)?);
            }
            if compounds.is_empty() {
                return Err(SelectorError::Empty);
            }
            alternatives.push(Complex { compounds });
        }

        Ok(Self {
            source: trimmed.to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns whether `node` matches any alternative of this list.
    pub fn matches(&self, document: &Document, node: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|complex| complex.matches(document, node))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

/// Splits on `is_separator` outside of attribute blocks and quotes, dropping
/// empty pieces produced by repeated separators.
fn split_top_level(
    input: &str,
    is_separator: impl Fn(char) -> bool,
) -> Result<Vec<&str>, SelectorError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0usize;

    for (offset, ch) in input.char_indices() {
        if let Some(open) = quote {
            if ch == open {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' if depth > 0 => quote = Some(ch),
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1).ok_or_else(|| SelectorError::UnexpectedChar {
                    selector: input.to_string(),
                    found: ']',
                })?;
            }
            _ if depth == 0 && is_separator(ch) => {
                let piece = input[start..offset].trim();
                if !piece.is_empty() {
                    parts.push(piece);
                }
                start = offset + ch.len_utf8();
            }
            _ => {}
        }
    }

    if depth > 0 || quote.is_some() {
        return Err(SelectorError::UnterminatedAttribute(input.to_string()));
    }
    let tail = input[start..].trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    Ok(parts)
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn take_ident(chars: &[char], index: &mut usize) -> String {
    let start = *index;
    while *index < chars.len() && is_ident_char(chars[*index]) {
        *index += 1;
    }
    chars[start..*index].iter().collect()
}

fn parse_compound(token: &str, selector: &str) -> Result<Compound, SelectorError> {
    let chars: Vec<char> = token.chars().collect();
    let mut compound = Compound::default();
    let mut index = 0usize;

    let unexpected = |found: char| SelectorError::UnexpectedChar {
        selector: selector.to_string(),
        found,
    };

    if index < chars.len() && chars[index] == '*' {
        index += 1;
    } else if index < chars.len() && is_ident_char(chars[index]) {
        compound.tag = Some(take_ident(&chars, &mut index).to_ascii_lowercase());
    }

    while index < chars.len() {
        let marker = chars[index];
        index += 1;
        match marker {
            '#' | '.' => {
                let name = take_ident(&chars, &mut index);
                if name.is_empty() {
                    return Err(unexpected(marker));
                }
                if marker == '#' {
                    compound.id = Some(name);
                } else {
                    compound.classes.push(name);
                }
            }
            '[' => {
                let close = chars[index..]
                    .iter()
                    .position(|ch| *ch == ']')
                    .map(|offset| index + offset)
                    .ok_or_else(|| SelectorError::UnterminatedAttribute(selector.to_string()))?;
                let body: String = chars[index..close].iter().collect();
                compound.attributes.push(parse_attribute(&body, selector)?);
                index = close + 1;
            }
            other => return Err(unexpected(other)),
        }
    }

    Ok(compound)
}

fn parse_attribute(body: &str, selector: &str) -> Result<AttributeMatch, SelectorError> {
    let invalid = || SelectorError::InvalidAttribute(selector.to_string());

    let (name, value, prefix) = match body.split_once('=') {
        None => (body.trim(), None, false),
        Some((left, right)) => {
            let (name, prefix) = match left.strip_suffix('^') {
                Some(name) => (name, true),
                None => (left, false),
            };
            (name.trim(), Some(unquote(right.trim()).ok_or_else(invalid)?), prefix)
        }
    };

    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(invalid());
    }

    Ok(match (value, prefix) {
        (None, _) => AttributeMatch::Present(name.to_string()),
        (Some(value), false) => AttributeMatch::Equals(name.to_string(), value),
        (Some(value), true) => AttributeMatch::Prefix(name.to_string(), value),
    })
}

fn unquote(raw: &str) -> Option<String> {
    for quote in ['"', '\''] {
        if let Some(inner) = raw.strip_prefix(quote) {
            return inner.strip_suffix(quote).map(str::to_string);
        }
    }
    if !raw.is_empty() && raw.chars().all(is_ident_char) {
        Some(raw.to_string())
    } else {
        None
    }
}
