//! User-controlled entity selection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::NormalizedMatrix;

/// Maximum number of entities a selection may hold.
pub const MAX_SELECTION: usize = costlens_shared::config::MAX_CHART_ENTITIES;

/// Outcome of [`EntitySelection::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// The entity was appended.
    Added,
    /// The entity was removed.
    Removed,
    /// The selection is full; nothing changed.
    Ignored,
}

/// Ordered set of pinned entities, capped at [`MAX_SELECTION`].
///
/// Order is significant: it drives color assignment and line order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct EntitySelection {
    members: Vec<String>,
}

impl EntitySelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from names, dropping duplicates and anything past the cap.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new();
        for name in names {
            let name = name.into();
            if selection.is_full() {
                break;
            }
            if !selection.contains(&name) {
                selection.members.push(name);
            }
        }
        selection
    }

    /// Adds `entity` if absent and there is room, removes it if present.
    pub fn toggle(&mut self, entity: &str) -> SelectionChange {
        if let Some(pos) = self.members.iter().position(|m| m == entity) {
            self.members.remove(pos);
            return SelectionChange::Removed;
        }
        if self.is_full() {
            debug!(entity, "selection full, ignoring addition");
            return SelectionChange::Ignored;
        }
        self.members.push(entity.to_string());
        SelectionChange::Added
    }

    /// Returns true if `entity` is selected.
    #[must_use]
    pub fn contains(&self, entity: &str) -> bool {
        self.members.iter().any(|m| m == entity)
    }

    /// Selected entities in user order.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Number of selected entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns true if the cap is reached.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_SELECTION
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Returns true if the selection is non-empty and every member exists in `matrix`.
    #[must_use]
    pub fn is_usable_for(&self, matrix: &NormalizedMatrix) -> bool {
        !self.is_empty() && self.members.iter().all(|m| matrix.contains_entity(m))
    }
}

impl From<Vec<String>> for EntitySelection {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<EntitySelection> for Vec<String> {
    fn from(selection: EntitySelection) -> Self {
        selection.members
    }
}
