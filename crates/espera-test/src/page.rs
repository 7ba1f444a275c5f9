//! Passive page snapshots and the matchers that query them.
//!
//! A [`Page`] is a frozen tree of [`Element`]s: what a driver would report
//! for one instant of a live page. Nothing here runs script or changes on
//! its own; pair a page with a [`Timeline`](crate::Timeline) or a
//! [`SharedState`](espera_core::SharedState) to get one that moves.
//!
//! Selectors support the subset needed for content assertions: `tag`,
//! `#id`, `.class`, compounds such as `td.name` and descendant chains such
//! as `#characters_list td`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TestError};
use crate::matcher::Matcher;

/// One element of a page snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    /// Tag name, lower case.
    pub tag: String,
    /// `id` attribute.
    #[serde(default)]
    pub id: Option<String>,
    /// `class` attribute, split on whitespace.
    #[serde(default)]
    pub classes: Vec<String>,
    /// Text directly inside this element.
    #[serde(default)]
    pub text: String,
    /// Child elements, in document order.
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Sets the `id` attribute.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the element's own text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several child elements.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns true if the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Text content of this element and all descendants, whitespace-normalized.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut words = Vec::new();
        self.collect_words(&mut words);
        words.join(" ")
    }

    fn collect_words<'a>(&'a self, words: &mut Vec<&'a str>) {
        words.extend(self.text.split_whitespace());
        for child in &self.children {
            child.collect_words(words);
        }
    }
}

/// One compound step of a selector: `tag#id.class.class`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(selector: &str, part: &str) -> Result<Self> {
        let mut compound = Self::default();
        let mut rest = part;

        let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
        if tag_end > 0 {
            let tag = &rest[..tag_end];
            validate_name(selector, tag, "tag")?;
            compound.tag = Some(tag.to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..end];
            match marker {
                '#' => {
                    validate_name(selector, name, "id")?;
                    if compound.id.is_some() {
                        return Err(TestError::selector(selector, "more than one id"));
                    }
                    compound.id = Some(name.to_string());
                }
                _ => {
                    validate_name(selector, name, "class")?;
                    compound.classes.push(name.to_string());
                }
            }
            rest = &body[end..];
        }

        Ok(compound)
    }

    fn matches(&self, element: &Element) -> bool {
        self.tag.as_ref().is_none_or(|tag| *tag == element.tag)
            && self
                .id
                .as_ref()
                .is_none_or(|id| element.id.as_ref() == Some(id))
            && self.classes.iter().all(|class| element.has_class(class))
    }
}

fn validate_name(selector: &str, name: &str, kind: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TestError::selector(selector, format!("empty {kind}")));
    }
    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TestError::selector(
            selector,
            format!("unsupported character in {kind} '{name}'"),
        ));
    }
    Ok(())
}

/// Parsed CSS selector (descendant chains of compound selectors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    steps: Vec<Compound>,
}

impl Selector {
    /// Parses a selector.
    ///
    /// # Errors
    /// Returns [`TestError::Selector`] for empty or unsupported syntax.
    pub fn parse(selector: &str) -> Result<Self> {
        let steps = selector
            .split_whitespace()
            .map(|part| Compound::parse(selector, part))
            .collect::<Result<Vec<_>>>()?;
        if steps.is_empty() {
            return Err(TestError::selector(selector, "selector is empty"));
        }
        Ok(Self {
            source: selector.trim().to_string(),
            steps,
        })
    }

    /// Returns the selector as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// `ancestors` is the path from the root down to `element`'s parent.
    fn matches(&self, ancestors: &[&Element], element: &Element) -> bool {
        let Some((last, outer)) = self.steps.split_last() else {
            return false;
        };
        if !last.matches(element) {
            return false;
        }
        let mut remaining = ancestors.iter().rev();
        outer
            .iter()
            .rev()
            .all(|step| remaining.any(|ancestor| step.matches(ancestor)))
    }
}

impl FromStr for Selector {
    type Err = TestError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Snapshot of a page: a forest of top-level elements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    /// Top-level elements, in document order.
    pub body: Vec<Element>,
}

impl Page {
    /// Creates a page from top-level elements.
    #[must_use]
    pub fn new(body: impl IntoIterator<Item = Element>) -> Self {
        Self {
            body: body.into_iter().collect(),
        }
    }

    /// Whitespace-normalized text of the whole page.
    #[must_use]
    pub fn text(&self) -> String {
        self.body
            .iter()
            .map(Element::text_content)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns true if the page text contains `content` (whitespace-normalized).
    #[must_use]
    pub fn has_content(&self, content: &str) -> bool {
        let needle = normalize(content);
        needle.is_empty() || self.text().contains(&needle)
    }

    /// All elements matching `selector`, in document order.
    #[must_use]
    pub fn all(&self, selector: &Selector) -> Vec<&Element> {
        let mut found = Vec::new();
        let mut path = Vec::new();
        for element in &self.body {
            collect(selector, element, &mut path, &mut found);
        }
        found
    }

    /// First element matching `selector`.
    #[must_use]
    pub fn first(&self, selector: &Selector) -> Option<&Element> {
        self.all(selector).into_iter().next()
    }

    /// Returns true if any element matches `selector`.
    #[must_use]
    pub fn has_css(&self, selector: &Selector) -> bool {
        self.first(selector).is_some()
    }

    /// Narrows the page to the first element matching `selector`.
    #[must_use]
    pub fn within(&self, selector: &Selector) -> Option<Self> {
        self.first(selector).map(|scope| Self::new([scope.clone()]))
    }
}

fn collect<'a>(
    selector: &Selector,
    element: &'a Element,
    path: &mut Vec<&'a Element>,
    found: &mut Vec<&'a Element>,
) {
    if selector.matches(path, element) {
        found.push(element);
    }
    path.push(element);
    for child in &element.children {
        collect(selector, child, path, found);
    }
    path.pop();
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Matches pages whose text contains a string.
#[derive(Debug, Clone)]
pub struct HasContent {
    content: String,
}

/// Matches pages whose text contains `content`.
#[must_use]
pub fn has_content(content: impl Into<String>) -> HasContent {
    HasContent {
        content: content.into(),
    }
}

impl Matcher<Page> for HasContent {
    fn matches(&self, page: &Page) -> bool {
        page.has_content(&self.content)
    }

    fn description(&self) -> String {
        format!("content '{}'", self.content)
    }
}

/// Matches pages containing an element for a selector, optionally with text.
#[derive(Debug, Clone)]
pub struct HasCss {
    selector: Selector,
    text: Option<String>,
}

/// Matches pages with at least one element matching `selector`.
///
/// # Errors
/// Returns [`TestError::Selector`] if `selector` cannot be parsed.
pub fn has_css(selector: &str) -> Result<HasCss> {
    Ok(HasCss {
        selector: Selector::parse(selector)?,
        text: None,
    })
}

/// Matches pages with an element matching `selector` whose text contains `text`.
///
/// # Errors
/// Returns [`TestError::Selector`] if `selector` cannot be parsed.
pub fn has_css_with_text(selector: &str, text: impl Into<String>) -> Result<HasCss> {
    Ok(HasCss {
        selector: Selector::parse(selector)?,
        text: Some(normalize(&text.into())),
    })
}

impl Matcher<Page> for HasCss {
    fn matches(&self, page: &Page) -> bool {
        match &self.text {
            None => page.has_css(&self.selector),
            Some(text) => page
                .all(&self.selector)
                .iter()
                .any(|element| element.text_content().contains(text.as_str())),
        }
    }

    fn description(&self) -> String {
        match &self.text {
            None => format!("css '{}'", self.selector),
            Some(text) => format!("css '{}' with text '{text}'", self.selector),
        }
    }
}

/// Applies a matcher inside the first element matching a selector.
///
/// Does not match while the scope element is missing.
#[derive(Debug, Clone)]
pub struct Within<M> {
    scope: Selector,
    inner: M,
}

/// Applies `inner` to the part of the page under `scope`.
///
/// # Errors
/// Returns [`TestError::Selector`] if `scope` cannot be parsed.
pub fn within<M: Matcher<Page>>(scope: &str, inner: M) -> Result<Within<M>> {
    Ok(Within {
        scope: Selector::parse(scope)?,
        inner,
    })
}

impl<M: Matcher<Page>> Matcher<Page> for Within<M> {
    fn matches(&self, page: &Page) -> bool {
        page.within(&self.scope)
            .is_some_and(|scoped| self.inner.matches(&scoped))
    }

    fn description(&self) -> String {
        format!("{} within '{}'", self.inner.description(), self.scope)
    }
}
