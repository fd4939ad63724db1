//! Scoring a draw against a ticket.

use crusher_types::{Draw, Selection};

/// Numbers present in both the ticket and the draw.
#[must_use]
pub fn count_matches(selection: &Selection, draw: &Draw) -> usize {
    selection.as_set().intersection(draw.as_set()).count()
}

/// A win needs every number on the ticket; partial overlap never counts.
#[must_use]
pub fn is_win(selection: &Selection, matches: usize) -> bool {
    matches == selection.difficulty().size()
}
