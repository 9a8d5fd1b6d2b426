use std::sync::Mutex;

use crate::traits::Region;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionSnapshot {
    pub visible: bool,
    pub text: String,
    pub html: String,
    /// Number of content writes (text or html) so far.
    pub writes: usize,
}

/// In-memory [`Region`] used by the CLI and by tests.
#[derive(Debug, Default)]
pub struct MemoryRegion {
    name: String,
    state: Mutex<RegionSnapshot>,
}

impl MemoryRegion {
    pub fn new(name: impl Into<String>, visible: bool) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(RegionSnapshot {
                visible,
                ..Default::default()
            }),
        }
    }

    pub fn hidden(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn visible(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn snapshot(&self) -> RegionSnapshot {
        self.with_state(|s| s.clone())
    }

    pub fn is_visible(&self) -> bool {
        self.with_state(|s| s.visible)
    }

    pub fn text(&self) -> String {
        self.with_state(|s| s.text.clone())
    }

    pub fn html(&self) -> String {
        self.with_state(|s| s.html.clone())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut RegionSnapshot) -> T) -> T {
        // A poisoned lock only means another writer panicked mid-update.
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl Region for MemoryRegion {
    fn set_visible(&self, visible: bool) {
        self.with_state(|s| s.visible = visible);
    }

    fn set_text(&self, text: &str) {
        self.with_state(|s| {
            s.text = text.to_string();
            s.writes += 1;
        });
    }

    fn set_html(&self, html: &str) {
        self.with_state(|s| {
            s.html = html.to_string();
            s.writes += 1;
        });
    }
}
