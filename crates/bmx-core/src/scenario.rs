//! Scenario and step definitions
//!
//! A scenario is a named, ordered sequence of steps against the target
//! application. Steps are pure descriptions; the runner interprets them.
//! [`Target`] carries the four locator conventions the suite uses (`#id`
//! selectors, visible text, ARIA role, field label) and the browser layer
//! resolves them uniformly.

use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a step refers to something on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Target {
    /// Structural CSS selector (`#auth-email`, `button[type='submit']`)
    Css { selector: String },
    /// Visible text content match
    Text { content: String },
    /// ARIA role plus accessible name (`role=button name="Sign In"`)
    Role { role: String, name: String },
    /// Form-field label or `aria-label` text
    Label { text: String },
}

impl Target {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css {
            selector: selector.into(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: name.into(),
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::Label { text: text.into() }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css { selector } => write!(f, "css={}", selector),
            Self::Text { content } => write!(f, "text={}", content),
            Self::Role { role, name } => write!(f, "role={} name={}", role, name),
            Self::Label { text } => write!(f, "label={}", text),
        }
    }
}

/// A single verification step
///
/// Wait steps carry an optional timeout; when omitted the runner falls back
/// to the harness-wide default. Assertions evaluate immediately against the
/// current page state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Navigate to a URL; relative paths are joined against the base URL
    Navigate { url: String },
    /// Fill a form field, replacing any existing value
    Fill { target: Target, value: String },
    /// Click an element
    Click { target: Target },
    /// Set the value of a `<select>` element and fire its change event
    SelectOption { target: Target, value: String },
    /// Poll until the target is visible or the timeout elapses
    WaitFor {
        target: Target,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_ms: Option<u64>,
    },
    /// Poll until the target's value contains `expected`
    ///
    /// For fields that update asynchronously, e.g. the version select
    /// reacting to a project change.
    WaitForValue {
        target: Target,
        expected: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_ms: Option<u64>,
    },
    /// Assert the target is currently visible
    AssertVisible { target: Target },
    /// Assert the target's value equals `expected`
    AssertValue { target: Target, expected: String },
    /// Assert an attribute of the target equals `expected`
    AssertAttribute {
        target: Target,
        attribute: String,
        expected: String,
    },
    /// Capture a named screenshot artifact
    Screenshot { label: String },
}

impl Step {
    /// Short human-readable description used in failure reasons
    pub fn describe(&self) -> String {
        match self {
            Self::Navigate { url } => format!("navigate to {}", url),
            Self::Fill { target, .. } => format!("fill {}", target),
            Self::Click { target } => format!("click {}", target),
            Self::SelectOption { target, value } => format!("select '{}' in {}", value, target),
            Self::WaitFor { target, .. } => format!("wait for {}", target),
            Self::WaitForValue {
                target, expected, ..
            } => format!("wait for {} to have value containing '{}'", target, expected),
            Self::AssertVisible { target } => format!("assert {} visible", target),
            Self::AssertValue { target, expected } => {
                format!("assert {} has value '{}'", target, expected)
            }
            Self::AssertAttribute {
                target, attribute, ..
            } => format!("assert attribute '{}' of {}", attribute, target),
            Self::Screenshot { label } => format!("screenshot '{}'", label),
        }
    }
}

/// A named, immutable verification scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique name; also namespaces this scenario's artifacts
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Ordered steps, executed strictly in sequence
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            steps: Vec::new(),
        }
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn navigate(self, url: impl Into<String>) -> Self {
        self.step(Step::Navigate { url: url.into() })
    }

    pub fn fill(self, target: Target, value: impl Into<String>) -> Self {
        self.step(Step::Fill {
            target,
            value: value.into(),
        })
    }

    pub fn click(self, target: Target) -> Self {
        self.step(Step::Click { target })
    }

    pub fn select(self, target: Target, value: impl Into<String>) -> Self {
        self.step(Step::SelectOption {
            target,
            value: value.into(),
        })
    }

    pub fn wait_for(self, target: Target) -> Self {
        self.step(Step::WaitFor {
            target,
            timeout_ms: None,
        })
    }

    pub fn wait_for_within(self, target: Target, timeout_ms: u64) -> Self {
        self.step(Step::WaitFor {
            target,
            timeout_ms: Some(timeout_ms),
        })
    }

    pub fn wait_for_value(self, target: Target, expected: impl Into<String>) -> Self {
        self.step(Step::WaitForValue {
            target,
            expected: expected.into(),
            timeout_ms: None,
        })
    }

    pub fn assert_visible(self, target: Target) -> Self {
        self.step(Step::AssertVisible { target })
    }

    pub fn assert_value(self, target: Target, expected: impl Into<String>) -> Self {
        self.step(Step::AssertValue {
            target,
            expected: expected.into(),
        })
    }

    pub fn assert_attribute(
        self,
        target: Target,
        attribute: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        self.step(Step::AssertAttribute {
            target,
            attribute: attribute.into(),
            expected: expected.into(),
        })
    }

    pub fn screenshot(self, label: impl Into<String>) -> Self {
        self.step(Step::Screenshot {
            label: label.into(),
        })
    }
}

/// Load a suite of scenarios from a JSON file
pub fn load_suite(path: &Path) -> Result<Vec<Scenario>> {
    let content = std::fs::read_to_string(path)?;
    let scenarios: Vec<Scenario> = serde_json::from_str(&content)?;

    // Duplicate names would let artifacts clobber each other
    let mut seen = std::collections::HashSet::new();
    for scenario in &scenarios {
        if !seen.insert(scenario.name.as_str()) {
            return Err(HarnessError::Config(format!(
                "duplicate scenario name '{}' in {}",
                scenario.name,
                path.display()
            )));
        }
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builder_preserves_step_order() {
        let scenario = Scenario::new("login", "valid login reaches dashboard")
            .navigate("/")
            .fill(Target::css("#auth-email"), "alex@test.com")
            .fill(Target::css("#auth-password"), "password")
            .click(Target::role("button", "Sign In"))
            .wait_for(Target::text("Dashboard"));

        assert_eq!(scenario.steps.len(), 5);
        assert!(matches!(scenario.steps[0], Step::Navigate { .. }));
        assert!(matches!(scenario.steps[4], Step::WaitFor { .. }));
    }

    #[test]
    fn test_target_display() {
        assert_eq!(Target::css("#auth-email").to_string(), "css=#auth-email");
        assert_eq!(Target::text("Dashboard").to_string(), "text=Dashboard");
        assert_eq!(
            Target::role("button", "Sign In").to_string(),
            "role=button name=Sign In"
        );
        assert_eq!(
            Target::label("Email Address").to_string(),
            "label=Email Address"
        );
    }

    #[test]
    fn test_step_describe_names_condition() {
        let step = Step::AssertValue {
            target: Target::css("#project-select"),
            expected: "p2".to_string(),
        };
        let description = step.describe();
        assert!(description.contains("#project-select"));
        assert!(description.contains("p2"));
    }

    #[test]
    fn test_load_suite_from_json() {
        let json = r#"[
            {
                "name": "smoke",
                "description": "basic load",
                "steps": [
                    { "action": "navigate", "url": "/" },
                    { "action": "wait_for", "target": { "by": "text", "content": "Beta Max" } },
                    { "action": "screenshot", "label": "auth" }
                ]
            }
        ]"#;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let suite = load_suite(file.path()).unwrap();
        assert_eq!(suite.len(), 1);
        assert_eq!(suite[0].name, "smoke");
        assert_eq!(suite[0].steps.len(), 3);
        assert_eq!(
            suite[0].steps[1],
            Step::WaitFor {
                target: Target::text("Beta Max"),
                timeout_ms: None,
            }
        );
    }

    #[test]
    fn test_load_suite_rejects_duplicate_names() {
        let json = r#"[
            { "name": "dup", "steps": [] },
            { "name": "dup", "steps": [] }
        ]"#;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let err = load_suite(file.path()).unwrap_err();
        assert!(err.to_string().contains("duplicate scenario name"));
    }
}
