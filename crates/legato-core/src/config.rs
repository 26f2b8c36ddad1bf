//! Bridge configuration.

/// Settings for a [`Bridge`](crate::Bridge).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Run a collection after this many heap allocations. `None` disables
    /// automatic collection.
    pub auto_collect_threshold: Option<u32>,
    /// Pre-allocated heap slots and identity entries.
    pub initial_capacity: usize,
    /// Whether dropping the bridge performs the shutdown teardown.
    pub finalize_on_drop: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            auto_collect_threshold: Some(256),
            initial_capacity: 64,
            finalize_on_drop: true,
        }
    }
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auto_collect_threshold(mut self, threshold: Option<u32>) -> Self {
        self.auto_collect_threshold = threshold;
        self
    }

    /// Collect only when asked to.
    pub fn manual_collection(self) -> Self {
        self.auto_collect_threshold(None)
    }

    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn finalize_on_drop(mut self, enabled: bool) -> Self {
        self.finalize_on_drop = enabled;
        self
    }
}
