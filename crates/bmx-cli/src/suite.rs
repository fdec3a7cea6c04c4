//! Builtin verification suite for the Beta Max front-end
//!
//! Every flow the old one-off scripts covered, consolidated into scenario
//! data. Credentials and URLs come from configuration; the only literals
//! here are what the target application actually renders.

use bmx_core::{HarnessConfig, Scenario, Target};

/// A scenario that starts from a signed-in dashboard
fn signed_in(name: &str, description: &str, config: &HarnessConfig) -> Scenario {
    Scenario::new(name, description)
        .navigate("/")
        .wait_for(Target::text("Beta Max"))
        .fill(Target::css("#auth-email"), &config.credentials.email)
        .fill(Target::css("#auth-password"), &config.credentials.password)
        .click(Target::role("button", "Sign In"))
        .wait_for_within(Target::text("Dashboard"), 5000)
}

/// The consolidated Beta Max verification suite
pub fn builtin_suite(config: &HarnessConfig) -> Vec<Scenario> {
    let credentials = &config.credentials;

    vec![
        signed_in("login", "valid credentials reach the dashboard", config),
        // Observing the rejection is the pass condition here
        Scenario::new("login-rejected", "wrong password surfaces the alert")
            .navigate("/")
            .wait_for(Target::text("Beta Max"))
            .fill(Target::css("#auth-email"), &credentials.email)
            .fill(Target::css("#auth-password"), "wrongpassword")
            .click(Target::role("button", "Sign In"))
            .wait_for_within(Target::role("alert", "Invalid credentials"), 5000),
        Scenario::new("password-toggle", "visibility toggle flips the input type")
            .navigate("/")
            .wait_for(Target::text("Beta Max"))
            .fill(Target::css("#auth-password"), "secret123")
            .assert_attribute(Target::css("#auth-password"), "type", "password")
            .click(Target::label("Show password"))
            .assert_attribute(Target::css("#auth-password"), "type", "text"),
        signed_in("dashboard", "project cards render after login", config)
            .wait_for(Target::text("Neon Wallet"))
            .assert_visible(Target::text("Titan OS Kernel")),
        signed_in("project-detail", "overview, changelog and feedback tabs", config)
            .click(Target::text("Neon Wallet"))
            .wait_for(Target::text("Description"))
            .assert_visible(Target::text("Testing Scope"))
            .assert_visible(Target::text("Biometric Login"))
            .click(Target::role("button", "changelog"))
            .wait_for(Target::text("Added biometric login flow"))
            .click(Target::role("button", "feedback"))
            .wait_for(Target::text("Community Reports")),
        signed_in("feedback-list", "community reports list its one item", config)
            .click(Target::text("Neon Wallet"))
            .wait_for(Target::text("Neon Wallet"))
            .click(Target::role("button", "feedback"))
            .wait_for(Target::text("Community Reports"))
            .assert_visible(Target::text("Crash on launch when offline"))
            .assert_visible(Target::text("Alex Dev"))
            .assert_visible(Target::text("Open"))
            .assert_visible(Target::text("1 item")),
        signed_in("feedback-empty", "project without reports shows the empty state", config)
            .click(Target::text("Titan OS Kernel"))
            .wait_for(Target::text("Titan OS Kernel"))
            .click(Target::role("button", "feedback"))
            .wait_for(Target::text("No community reports yet"))
            .assert_visible(Target::text("Be the first to spot a bug!"))
            .assert_visible(Target::text("0 items")),
        signed_in("feedback-form", "feedback form exposes project and version selects", config)
            .click(Target::label("Add feedback"))
            .wait_for(Target::text("Submit Feedback"))
            .assert_visible(Target::css("#project-select"))
            .assert_visible(Target::css("#version-select")),
        // Changing the project must drive the version select without sleeps:
        // wait for the target value, not a fixed delay
        signed_in("version-sync", "version select follows the chosen project", config)
            .click(Target::label("Add feedback"))
            .wait_for(Target::text("Submit Feedback"))
            .assert_value(Target::css("#project-select"), "p1")
            .wait_for_value(Target::css("#version-select"), "4.2.0")
            .select(Target::css("#project-select"), "p2")
            .wait_for_value(Target::css("#version-select"), "0.9.1")
            .select(Target::css("#project-select"), "p1")
            .wait_for_value(Target::css("#version-select"), "4.2.0"),
        signed_in("feedback-submit", "filled form posts and returns to the dashboard", config)
            .click(Target::label("Add feedback"))
            .wait_for(Target::text("Submit Feedback"))
            .fill(Target::css("#title-input"), "Crash when rotating device")
            .fill(
                Target::css("#description-input"),
                "Rotate the device during sync and the app closes.",
            )
            .click(Target::role("button", "Post"))
            .wait_for(Target::text("Dashboard")),
        Scenario::new("navigation", "unauthenticated load lands on the auth screen")
            .navigate("/")
            .wait_for(Target::text("Beta Max"))
            .assert_visible(Target::role("button", "Sign In"))
            .screenshot("auth-screen"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmx_core::Step;
    use std::collections::HashSet;

    #[test]
    fn test_scenario_names_are_unique_and_nonempty() {
        let suite = builtin_suite(&HarnessConfig::default());
        assert!(!suite.is_empty());

        let mut names = HashSet::new();
        for scenario in &suite {
            assert!(!scenario.steps.is_empty(), "{} has no steps", scenario.name);
            assert!(names.insert(scenario.name.clone()), "duplicate {}", scenario.name);
        }
    }

    #[test]
    fn test_login_uses_configured_credentials() {
        let mut config = HarnessConfig::default();
        config.credentials.email = "sam@test.com".to_string();
        config.credentials.password = "test1234".to_string();

        let suite = builtin_suite(&config);
        let login = suite.iter().find(|s| s.name == "login").unwrap();

        let filled: Vec<&str> = login
            .steps
            .iter()
            .filter_map(|step| match step {
                Step::Fill { value, .. } => Some(value.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(filled, vec!["sam@test.com", "test1234"]);
    }

    #[test]
    fn test_rejected_login_ignores_configured_password() {
        let suite = builtin_suite(&HarnessConfig::default());
        let rejected = suite.iter().find(|s| s.name == "login-rejected").unwrap();

        assert!(rejected.steps.iter().any(|step| matches!(
            step,
            Step::Fill { value, .. } if value == "wrongpassword"
        )));
        assert!(rejected.steps.iter().any(|step| matches!(
            step,
            Step::WaitFor { target: Target::Role { role, name }, .. }
                if role == "alert" && name.contains("Invalid credentials")
        )));
    }

    #[test]
    fn test_version_sync_waits_for_values_instead_of_sleeping() {
        let suite = builtin_suite(&HarnessConfig::default());
        let scenario = suite.iter().find(|s| s.name == "version-sync").unwrap();

        let waited: Vec<&str> = scenario
            .steps
            .iter()
            .filter_map(|step| match step {
                Step::WaitForValue { expected, .. } => Some(expected.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(waited, vec!["4.2.0", "0.9.1", "4.2.0"]);
    }
}
