//! Edit session over configuration rows.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::debug;

use super::payload::{ResponsiblePartyPatch, SupplierConfigBulk, SupplierConfigPatch, display_name_value};
use super::rows::{EditableRow, SupplierConfig};
use crate::summary::ResponsibleParty;

/// Drafts, filter and selection over a list of saved rows.
#[derive(Debug, Clone)]
pub struct EditSession<R: EditableRow> {
    rows: Vec<R>,
    drafts: HashMap<R::Key, R::Draft>,
    selected: HashSet<R::Key>,
    filter: String,
}

impl<R: EditableRow> EditSession<R> {
    /// Starts a session with every draft equal to its saved row.
    #[must_use]
    pub fn new(rows: Vec<R>) -> Self {
        let drafts = rows.iter().map(|r| (r.key(), r.initial_draft())).collect();
        Self {
            rows,
            drafts,
            selected: HashSet::new(),
            filter: String::new(),
        }
    }

    /// Replaces the saved rows, e.g. after a successful save.
    ///
    /// Drafts and selection start over; the filter is kept.
    pub fn reload(&mut self, rows: Vec<R>) {
        let filter = std::mem::take(&mut self.filter);
        *self = Self::new(rows);
        self.filter = filter;
    }

    /// Saved rows, in load order.
    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Draft of a row.
    #[must_use]
    pub fn draft(&self, key: &R::Key) -> Option<&R::Draft> {
        self.drafts.get(key)
    }

    /// Edits a row's draft in place. Returns false for unknown keys.
    pub fn edit(&mut self, key: &R::Key, change: impl FnOnce(&mut R::Draft)) -> bool {
        match self.drafts.get_mut(key) {
            Some(draft) => {
                change(draft);
                true
            }
            None => false,
        }
    }

    /// Returns true if the row's draft differs from its saved values.
    #[must_use]
    pub fn is_dirty(&self, key: &R::Key) -> bool {
        self.rows
            .iter()
            .find(|r| &r.key() == key)
            .zip(self.drafts.get(key))
            .is_some_and(|(row, draft)| row.differs(draft))
    }

    /// Dirty rows with their drafts, in load order.
    #[must_use]
    pub fn changed(&self) -> Vec<(&R, &R::Draft)> {
        self.rows
            .iter()
            .filter_map(|row| {
                self.drafts
                    .get(&row.key())
                    .filter(|draft| row.differs(draft))
                    .map(|draft| (row, draft))
            })
            .collect()
    }

    /// Number of dirty rows.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.changed().len()
    }

    /// Returns true if any row is dirty.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        self.rows
            .iter()
            .any(|row| self.drafts.get(&row.key()).is_some_and(|d| row.differs(d)))
    }

    /// Resets every draft to its saved values.
    pub fn discard(&mut self) {
        debug!(pending = self.pending_count(), "discarding edits");
        self.drafts = self.rows.iter().map(|r| (r.key(), r.initial_draft())).collect();
    }

    /// Sets the case-insensitive search filter.
    pub fn set_filter(&mut self, query: &str) {
        self.filter = query.trim().to_lowercase();
    }

    /// Rows matching the filter, in load order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&R> {
        self.rows
            .iter()
            .filter(|r| self.filter.is_empty() || r.matches(&self.filter))
            .collect()
    }

    /// Toggles a row's selection. Returns true if it is now selected.
    pub fn toggle_selected(&mut self, key: &R::Key) -> bool {
        if self.selected.remove(key) {
            false
        } else {
            self.selected.insert(key.clone());
            true
        }
    }

    /// Returns true if the row is selected.
    #[must_use]
    pub fn is_selected(&self, key: &R::Key) -> bool {
        self.selected.contains(key)
    }

    /// Number of selected rows, filtered or not.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Returns true if the filter matches rows and all of them are selected.
    #[must_use]
    pub fn all_filtered_selected(&self) -> bool {
        let filtered = self.filtered();
        !filtered.is_empty() && filtered.iter().all(|r| self.selected.contains(&r.key()))
    }

    /// Returns true if at least one filtered row is selected.
    #[must_use]
    pub fn any_filtered_selected(&self) -> bool {
        self.filtered().iter().any(|r| self.selected.contains(&r.key()))
    }

    /// Deselects the filtered rows if all are selected, otherwise selects them.
    ///
    /// Selected rows hidden by the filter are left alone.
    pub fn toggle_select_all_filtered(&mut self) {
        let keys: Vec<R::Key> = self.filtered().iter().map(|r| r.key()).collect();
        if self.all_filtered_selected() {
            for key in &keys {
                self.selected.remove(key);
            }
        } else {
            self.selected.extend(keys);
        }
    }

    /// Deselects everything.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }
}

impl EditSession<ResponsibleParty> {
    /// Edits a party's monthly budget.
    pub fn set_budget(&mut self, id: i64, monthly_budget: Decimal) -> bool {
        self.edit(&id, |draft| draft.monthly_budget = monthly_budget)
    }

    /// Edits a party's display alias.
    pub fn set_display_name(&mut self, id: i64, display_name: &str) -> bool {
        self.edit(&id, |draft| draft.display_name = display_name.to_string())
    }

    /// One PATCH body per dirty party, in load order.
    #[must_use]
    pub fn patches(&self) -> Vec<(i64, ResponsiblePartyPatch)> {
        self.changed()
            .into_iter()
            .map(|(row, draft)| {
                (
                    row.id,
                    ResponsiblePartyPatch {
                        monthly_budget: draft.monthly_budget,
                        display_name: display_name_value(&draft.display_name),
                    },
                )
            })
            .collect()
    }
}

impl EditSession<SupplierConfig> {
    /// Edits a supplier's display alias.
    pub fn set_display_name(&mut self, original_name: &str, display_name: &str) -> bool {
        self.edit(&original_name.to_string(), |draft| {
            draft.display_name = display_name.to_string();
        })
    }

    /// Flips a supplier's visibility.
    pub fn toggle_visible(&mut self, original_name: &str) -> bool {
        self.edit(&original_name.to_string(), |draft| draft.visible = !draft.visible)
    }

    /// Shows or hides every selected supplier. Returns the number affected.
    pub fn set_selected_visibility(&mut self, visible: bool) -> usize {
        let keys: Vec<String> = self.selected.iter().cloned().collect();
        let affected = keys
            .iter()
            .filter(|key| self.edit(key, |draft| draft.visible = visible))
            .count();
        debug!(affected, visible, "bulk visibility change");
        affected
    }

    /// Single bulk body holding every dirty supplier, in load order.
    #[must_use]
    pub fn bulk_payload(&self) -> SupplierConfigBulk {
        SupplierConfigBulk {
            configs: self
                .changed()
                .into_iter()
                .map(|(row, draft)| SupplierConfigPatch {
                    original_name: row.original_name.clone(),
                    display_name: display_name_value(&draft.display_name),
                    visible: draft.visible,
                })
                .collect(),
        }
    }
}
