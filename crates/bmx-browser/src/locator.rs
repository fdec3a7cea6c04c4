//! Target-to-query resolution
//!
//! Scenarios address the page four different ways: structural CSS
//! (`#auth-email`), visible text, ARIA role plus accessible name, and field
//! labels. CSS targets pass straight through to `querySelector`; the rest
//! compile to XPath so one lookup path serves all conventions.

use bmx_core::Target;

/// A resolved page query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Css(String),
    XPath(String),
}

/// Resolve a scenario target into a page query
pub fn resolve(target: &Target) -> Query {
    match target {
        Target::Css { selector } => Query::Css(selector.clone()),
        Target::Text { content } => {
            let literal = xpath_literal(content);
            // Innermost element containing the text, so a match on "Dashboard"
            // lands on the heading rather than <body>
            Query::XPath(format!(
                "//*[contains(normalize-space(.), {lit}) and \
                 not(.//*[contains(normalize-space(.), {lit})])]",
                lit = literal
            ))
        }
        Target::Role { role, name } => Query::XPath(role_xpath(role, name)),
        Target::Label { text } => {
            let literal = xpath_literal(text);
            // aria-label directly, or an input tied to a <label for=..>
            Query::XPath(format!(
                "//*[@aria-label={lit}] | \
                 //*[@id = //label[contains(normalize-space(.), {lit})]/@for]",
                lit = literal
            ))
        }
    }
}

/// Elements that carry a role implicitly, without a `role` attribute
fn implicit_tags(role: &str) -> &'static [&'static str] {
    match role {
        "button" => &["button"],
        "link" => &["a"],
        "heading" => &["h1", "h2", "h3", "h4", "h5", "h6"],
        "textbox" => &["input", "textarea"],
        "combobox" => &["select"],
        _ => &[],
    }
}

fn role_xpath(role: &str, name: &str) -> String {
    let role_literal = xpath_literal(role);
    let mut role_predicate = format!("@role={}", role_literal);
    for tag in implicit_tags(role) {
        role_predicate.push_str(&format!(" or self::{}", tag));
    }

    if name.is_empty() {
        format!("//*[{}]", role_predicate)
    } else {
        let name_literal = xpath_literal(name);
        format!(
            "//*[{}][contains(normalize-space(.), {lit}) or contains(@aria-label, {lit})]",
            role_predicate,
            lit = name_literal
        )
    }
}

/// Quote a string as an XPath 1.0 literal
///
/// XPath has no escape sequences; strings containing both quote kinds fall
/// back to concat().
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{}'", value)
    } else if !value.contains('"') {
        format!("\"{}\"", value)
    } else {
        let parts: Vec<String> = value
            .split('\'')
            .map(|part| format!("'{}'", part))
            .collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}
