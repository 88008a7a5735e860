// Panel registry - ordered panel collection with stable identity
use super::panel::{ConfigError, PanelConfig, PanelDraft, PanelId};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid panel config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("invalid reorder: {0}")]
    InvalidReorder(String),
}

/// Ordered collection of panels for one board session.
///
/// Identity is a monotonic counter assigned at `add` and never reused, even
/// across `clear`. Keying panels by title or by measurement+chart strings is
/// exactly what this type exists to prevent: two panels with identical
/// display fields stay distinguishable through any remove/reorder sequence.
#[derive(Debug)]
pub struct PanelRegistry {
    panels: Vec<PanelConfig>,
    next_id: u64,
}

impl Default for PanelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self {
            panels: Vec::new(),
            next_id: 1,
        }
    }

    /// Validates the draft, assigns a fresh id, and appends the panel at the
    /// end of the order. A rejected draft adds nothing.
    pub fn add(&mut self, draft: PanelDraft) -> Result<PanelId, RegistryError> {
        draft.style.validate()?;

        let id = PanelId(self.next_id);
        self.next_id += 1;
        self.panels.push(PanelConfig {
            id,
            measurement: draft.measurement,
            chart_kind: draft.chart_kind,
            style: draft.style,
            title: draft.title,
        });
        Ok(id)
    }

    /// Removes the panel with this id, preserving the relative order of the
    /// rest. Idempotent: a missing id is not an error, just `false`.
    pub fn remove(&mut self, id: PanelId) -> bool {
        let before = self.panels.len();
        self.panels.retain(|p| p.id != id);
        self.panels.len() != before
    }

    /// Replaces the current order with `new_order`, which must be an exact
    /// permutation of the current id set. On any mismatch (missing,
    /// duplicate, or foreign id) the registry is left untouched.
    pub fn reorder(&mut self, new_order: &[PanelId]) -> Result<(), RegistryError> {
        if new_order.len() != self.panels.len() {
            return Err(RegistryError::InvalidReorder(format!(
                "expected {} ids, got {}",
                self.panels.len(),
                new_order.len()
            )));
        }

        let current: HashSet<PanelId> = self.panels.iter().map(|p| p.id).collect();
        let mut seen = HashSet::with_capacity(new_order.len());
        for id in new_order {
            if !current.contains(id) {
                return Err(RegistryError::InvalidReorder(format!("unknown id {id}")));
            }
            if !seen.insert(*id) {
                return Err(RegistryError::InvalidReorder(format!("duplicate id {id}")));
            }
        }

        // Bijection confirmed; every id resolves to exactly one panel.
        let mut remaining = std::mem::take(&mut self.panels);
        self.panels.reserve(new_order.len());
        for id in new_order {
            if let Some(pos) = remaining.iter().position(|p| p.id == *id) {
                self.panels.push(remaining.swap_remove(pos));
            }
        }
        Ok(())
    }

    /// Empties the board. Retired ids stay retired: the counter survives so
    /// a re-added panel can never collide with a stale reference.
    pub fn clear(&mut self) {
        self.panels.clear();
    }

    /// Panels in current display order.
    pub fn list(&self) -> &[PanelConfig] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}
