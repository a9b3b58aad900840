//! Playwright-style element locators.
//!
//! A [`Locator`] is a chain of [`Step`]s. Each step narrows the set of
//! elements produced by the previous one, starting from the document. The
//! chain is serialized to JSON and resolved inside the page by
//! `locator_script.js`, so every query is a single `Runtime.evaluate`.

use std::fmt;

use serde::Serialize;

/// How text (element text or accessible name) is compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum TextMatch {
    /// Whitespace-normalized, case-sensitive full match.
    Exact(String),
    /// Whitespace-normalized, case-insensitive substring.
    Contains(String),
    /// JavaScript regular expression source.
    Pattern(String),
}

impl TextMatch {
    pub fn exact(text: impl Into<String>) -> Self {
        Self::Exact(text.into())
    }

    pub fn contains(text: impl Into<String>) -> Self {
        Self::Contains(text.into())
    }

    pub fn pattern(source: impl Into<String>) -> Self {
        Self::Pattern(source.into())
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextMatch::Exact(s) => write!(f, "\"{}\"", s),
            TextMatch::Contains(s) => write!(f, "{}", s),
            TextMatch::Pattern(s) => write!(f, "/{}/", s),
        }
    }
}

/// One narrowing step of a locator chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Descendants matching a CSS selector.
    Css { selector: String },
    /// Descendants with an explicit or implicit ARIA role.
    Role {
        role: String,
        name: Option<TextMatch>,
    },
    /// Descendants with a matching `data-testid`.
    TestId { id: String },
    /// Smallest descendants whose text matches.
    Text { text: TextMatch },
    /// Keep only current elements whose text matches.
    HasText { text: TextMatch },
    /// Keep a single element; negative indices count from the end.
    Nth { index: i64 },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Css { selector } => write!(f, "css={}", selector),
            Step::Role { role, name: None } => write!(f, "role={}", role),
            Step::Role {
                role,
                name: Some(name),
            } => write!(f, "role={}[name={}]", role, name),
            Step::TestId { id } => write!(f, "test-id={}", id),
            Step::Text { text } => write!(f, "text={}", text),
            Step::HasText { text } => write!(f, "has-text={}", text),
            Step::Nth { index } => write!(f, "nth={}", index),
        }
    }
}

/// A chain of steps identifying zero or more elements on a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Locator {
    steps: Vec<Step>,
}

impl Locator {
    fn from_step(step: Step) -> Self {
        Self { steps: vec![step] }
    }

    fn push(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Elements matching a CSS selector.
    pub fn css(selector: impl Into<String>) -> Self {
        Self::from_step(Step::Css {
            selector: selector.into(),
        })
    }

    /// Elements with the given role, regardless of name.
    pub fn role(role: impl Into<String>) -> Self {
        Self::from_step(Step::Role {
            role: role.into(),
            name: None,
        })
    }

    /// Elements with the given role and accessible name.
    pub fn role_named(role: impl Into<String>, name: TextMatch) -> Self {
        Self::from_step(Step::Role {
            role: role.into(),
            name: Some(name),
        })
    }

    /// Elements with `data-testid` equal to `id`.
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::from_step(Step::TestId { id: id.into() })
    }

    /// Smallest elements whose text matches.
    pub fn text(text: TextMatch) -> Self {
        Self::from_step(Step::Text { text })
    }

    /// Resolve `inner` relative to every element this locator matches.
    pub fn within(mut self, inner: Locator) -> Self {
        self.steps.extend(inner.steps);
        self
    }

    pub fn filter_has_text(self, text: TextMatch) -> Self {
        self.push(Step::HasText { text })
    }

    pub fn nth(self, index: i64) -> Self {
        self.push(Step::Nth { index })
    }

    pub fn first(self) -> Self {
        self.nth(0)
    }

    pub fn last(self) -> Self {
        self.nth(-1)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" >> ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

/// Operation performed by the in-page resolver on the matched elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum LocatorAction {
    Count,
    Visible,
    Text,
    Attribute,
    Focus,
    Point,
}

/// Source of the resolver function, called as `fn(steps, action, arg)`.
pub(crate) fn locator_script() -> &'static str {
    include_str!("locator_script.js")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_chain() {
        let locator = Locator::css("div")
            .filter_has_text(TextMatch::exact("Osmosis"))
            .within(Locator::role_named("button", TextMatch::exact("Send back")))
            .first();
        assert_eq!(
            locator.to_string(),
            r#"css=div >> has-text="Osmosis" >> role=button[name="Send back"] >> nth=0"#
        );
    }

    #[test]
    fn test_text_match_display() {
        assert_eq!(TextMatch::contains("Invalid").to_string(), "Invalid");
        assert_eq!(TextMatch::pattern("^LUNA").to_string(), "/^LUNA/");
    }

    #[test]
    fn test_serialize_steps() {
        let locator = Locator::role_named("link", TextMatch::exact("New wallet")).last();
        let value = serde_json::to_value(&locator).unwrap();
        assert_eq!(
            value,
            json!([
                {"kind": "role", "role": "link", "name": {"mode": "exact", "value": "New wallet"}},
                {"kind": "nth", "index": -1}
            ])
        );
    }

    #[test]
    fn test_serialize_role_without_name() {
        let value = serde_json::to_value(Locator::role("textbox")).unwrap();
        assert_eq!(value, json!([{"kind": "role", "role": "textbox", "name": null}]));
    }

    #[test]
    fn test_action_serialize() {
        assert_eq!(serde_json::to_value(LocatorAction::Point).unwrap(), json!("point"));
    }

    #[test]
    fn test_script_is_function() {
        assert!(locator_script().trim_start().starts_with("function"));
    }
}
