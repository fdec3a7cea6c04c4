//! In-memory session doubles for runner tests
//!
//! `MockSession` answers target queries from fixed tables instead of a real
//! page, and `MockProvider` counts acquires and releases so lifecycle
//! invariants are checkable without a browser.

use async_trait::async_trait;
use bmx_browser::{Session, SessionProvider};
use bmx_core::{HarnessError, Result, Target};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) struct MockSession {
    visible: HashSet<String>,
    /// Per-target value sequences; the last entry persists once reached
    values: Mutex<HashMap<String, VecDeque<String>>>,
    attributes: HashMap<String, String>,
    fail_navigate: bool,
    closes: Arc<AtomicUsize>,
}

impl MockSession {
    pub(crate) fn new() -> Self {
        Self {
            visible: HashSet::new(),
            values: Mutex::new(HashMap::new()),
            attributes: HashMap::new(),
            fail_navigate: false,
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn with_visible(mut self, target: &Target) -> Self {
        self.visible.insert(target.to_string());
        self
    }

    pub(crate) fn with_value(self, target: &Target, value: &str) -> Self {
        self.with_value_sequence(target, &[value])
    }

    pub(crate) fn with_value_sequence(mut self, target: &Target, values: &[&str]) -> Self {
        self.visible.insert(target.to_string());
        self.values.get_mut().unwrap().insert(
            target.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    pub(crate) fn with_attribute(mut self, target: &Target, name: &str, value: &str) -> Self {
        self.visible.insert(target.to_string());
        self.attributes
            .insert(format!("{}@{}", target, name), value.to_string());
        self
    }

    pub(crate) fn failing_navigation(mut self) -> Self {
        self.fail_navigate = true;
        self
    }

    fn known(&self, target: &Target) -> bool {
        self.visible.contains(&target.to_string())
    }
}

#[async_trait]
impl Session for MockSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        if self.fail_navigate {
            Err(HarnessError::Session(format!(
                "navigation to {} failed",
                url
            )))
        } else {
            Ok(())
        }
    }

    async fn fill(&self, target: &Target, _value: &str) -> Result<bool> {
        Ok(self.known(target))
    }

    async fn click(&self, target: &Target) -> Result<bool> {
        Ok(self.known(target))
    }

    async fn select_option(&self, target: &Target, _value: &str) -> Result<bool> {
        Ok(self.known(target))
    }

    async fn is_visible(&self, target: &Target) -> Result<bool> {
        Ok(self.known(target))
    }

    async fn value_of(&self, target: &Target) -> Result<Option<String>> {
        let mut values = self.values.lock().unwrap();
        match values.get_mut(&target.to_string()) {
            Some(queue) => {
                let value = if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                };
                Ok(value)
            }
            None => Ok(None),
        }
    }

    async fn attribute_of(&self, target: &Target, attribute: &str) -> Result<Option<String>> {
        Ok(self
            .attributes
            .get(&format!("{}@{}", target, attribute))
            .cloned())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn close(&self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out pre-built sessions in order, counting acquires and releases
pub(crate) struct MockProvider {
    sessions: Mutex<VecDeque<MockSession>>,
    acquires: Arc<AtomicUsize>,
    releases: Arc<AtomicUsize>,
}

impl MockProvider {
    pub(crate) fn new(sessions: Vec<MockSession>) -> Self {
        // All sessions share one release counter so the suite-wide
        // acquire/release balance is checkable in one place
        let releases = Arc::new(AtomicUsize::new(0));
        let sessions: VecDeque<MockSession> = sessions
            .into_iter()
            .map(|mut session| {
                session.closes = Arc::clone(&releases);
                session
            })
            .collect();

        Self {
            sessions: Mutex::new(sessions),
            acquires: Arc::new(AtomicUsize::new(0)),
            releases,
        }
    }

    pub(crate) fn acquire_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.acquires)
    }

    pub(crate) fn release_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.releases)
    }
}

#[async_trait]
impl SessionProvider for MockProvider {
    async fn acquire(&self) -> Result<Box<dyn Session>> {
        let session = self
            .sessions
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| HarnessError::Browser("no session scripted for acquire".to_string()))?;
        self.acquires.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(session))
    }
}
