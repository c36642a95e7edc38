//! Pointer-driven selection tracking
//!
//! This module accumulates pointer positions between button-down and
//! button-up into a normalized bounding rectangle. It knows nothing about
//! tiles; snapping happens in [`crate::domain::snap`].

use crate::domain::core::{Point, Rect};

/// Errors that can occur during selection operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// No pointer-down has been seen yet
    #[error("no selection has been started")]
    NoSelectionStarted,
    /// The selection was already frozen by a pointer-up
    #[error("selection is already frozen")]
    SelectionFrozen,
}

/// State of the current selection process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// No pointer-down yet
    NotStarted,
    /// Button held; the rectangle grows with every move
    Dragging { rect: Rect },
    /// Button released; the rectangle no longer changes
    Frozen { rect: Rect },
}

/// Bounding box of every pointer position seen during one drag
///
/// The rectangle is re-derived with min/max on every update, so it is
/// normalized regardless of drag direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    state: SelectionState,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    /// Creates a new, empty selection
    ///
    /// # Example
    /// ```rust
    /// use tile_screen::domain::selection::Selection;
    ///
    /// let selection = Selection::new();
    /// assert!(selection.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            state: SelectionState::NotStarted,
        }
    }

    /// Returns the current selection state
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// True if no pointer-down has been seen
    pub fn is_empty(&self) -> bool {
        matches!(self.state, SelectionState::NotStarted)
    }

    /// True while the button is held
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging { .. })
    }

    /// True once the button has been released
    pub fn is_frozen(&self) -> bool {
        matches!(self.state, SelectionState::Frozen { .. })
    }

    /// Starts a selection at `point`
    ///
    /// A pointer-down while already dragging restarts the selection there.
    pub fn begin(&mut self, point: Point) -> Result<(), SelectionError> {
        if self.is_frozen() {
            return Err(SelectionError::SelectionFrozen);
        }
        self.state = SelectionState::Dragging {
            rect: Rect::from_point(point),
        };
        Ok(())
    }

    /// Grows the selection to include `point`
    ///
    /// # Returns
    /// `Ok(true)` if the rectangle changed, `Ok(false)` if `point` was
    /// already inside it.
    ///
    /// # Example
    /// ```rust
    /// use tile_screen::domain::{core::{Point, Rect}, selection::Selection};
    ///
    /// let mut selection = Selection::new();
    /// selection.begin(Point::new(50, 50)).unwrap();
    /// assert_eq!(selection.extend(Point::new(10, 80)), Ok(true));
    /// assert_eq!(selection.extend(Point::new(30, 60)), Ok(false));
    /// assert_eq!(selection.rect(), Some(Rect::new(10, 50, 50, 80)));
    /// ```
    pub fn extend(&mut self, point: Point) -> Result<bool, SelectionError> {
        match self.state {
            SelectionState::Dragging { rect } => {
                let grown = rect.expanded_to(point);
                self.state = SelectionState::Dragging { rect: grown };
                Ok(grown != rect)
            }
            SelectionState::NotStarted => Err(SelectionError::NoSelectionStarted),
            SelectionState::Frozen { .. } => Err(SelectionError::SelectionFrozen),
        }
    }

    /// Freezes the selection and returns the final rectangle
    pub fn freeze(&mut self) -> Result<Rect, SelectionError> {
        match self.state {
            SelectionState::Dragging { rect } => {
                self.state = SelectionState::Frozen { rect };
                Ok(rect)
            }
            SelectionState::NotStarted => Err(SelectionError::NoSelectionStarted),
            SelectionState::Frozen { .. } => Err(SelectionError::SelectionFrozen),
        }
    }

    /// Returns the current rectangle, if any
    pub fn rect(&self) -> Option<Rect> {
        match self.state {
            SelectionState::NotStarted => None,
            SelectionState::Dragging { rect } | SelectionState::Frozen { rect } => Some(rect),
        }
    }

    /// Resets the selection to empty state
    pub fn reset(&mut self) {
        self.state = SelectionState::NotStarted;
    }
}
