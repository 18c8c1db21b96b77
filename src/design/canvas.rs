//! Canvas interaction state: the single selected element.
//!
//! The canvas never owns a `Design`. Every mutating call takes the current
//! design by reference and hands back the next one, leaving the caller to
//! decide when to commit it.

use serde::Serialize;

use super::{Design, DesignError, ElementId, Position};

/// Selection state for one design surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Canvas {
    selected: Option<ElementId>,
}

impl Canvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select `id`, replacing any previous selection.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if `design` has no such element.
    pub fn select(&mut self, design: &Design, id: &str) -> Result<(), DesignError> {
        if !design.contains(id) {
            return Err(DesignError::ElementNotFound(id.to_string()));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Click on empty canvas.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Shift `id` by a drag delta and select it. Positions are not clamped.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if `design` has no such element.
    pub fn nudge(&mut self, design: &Design, id: &str, dx: f64, dy: f64) -> Result<Design, DesignError> {
        let next = design.translate_element(id, dx, dy)?;
        self.selected = Some(id.to_string());
        Ok(next)
    }

    /// Move `id` to an absolute position and select it.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if `design` has no such element.
    pub fn move_to(&mut self, design: &Design, id: &str, position: Position) -> Result<Design, DesignError> {
        let next = design.move_element(id, position)?;
        self.selected = Some(id.to_string());
        Ok(next)
    }

    /// Delete `id`. Clears the selection if it pointed at it.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if `design` has no such element.
    pub fn delete(&mut self, design: &Design, id: &str) -> Result<Design, DesignError> {
        let next = design.delete_element(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(next)
    }

    /// Delete whatever is selected.
    ///
    /// # Errors
    ///
    /// Returns `NothingSelected` when there is no selection.
    pub fn delete_selected(&mut self, design: &Design) -> Result<Design, DesignError> {
        let id = self.selection().ok_or(DesignError::NothingSelected)?.to_string();
        self.delete(design, &id)
    }

    /// Drop a selection that refers to an element no longer in `design`.
    /// Called after the element list is replaced wholesale.
    pub fn reconcile(&mut self, design: &Design) {
        if self.selection().is_some_and(|id| !design.contains(id)) {
            self.selected = None;
        }
    }
}

#[cfg(test)]
#[path = "canvas_test.rs"]
mod tests;
