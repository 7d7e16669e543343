//! State machine behind the history screens.

/// Prefix for messages surfaced when the history query fails.
pub const LOAD_FAILURE_PREFIX: &str = "Failed to load workouts: ";

/// What a history screen shows.
///
/// A view starts in [`HistoryView::Loading`] and is resolved exactly once
/// with the result of its single query. There is no retry and no cached
/// fallback: a failed query yields [`HistoryView::Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryView<T> {
    Loading,
    Error(String),
    Empty,
    Populated(Vec<T>),
}

impl<T> Default for HistoryView<T> {
    fn default() -> Self {
        HistoryView::Loading
    }
}

impl<T> HistoryView<T> {
    /// Resolve the view from the query result.
    ///
    /// Records are kept in the order the store returned them.
    pub fn resolve<E: std::fmt::Display>(result: Result<Vec<T>, E>) -> Self {
        match result {
            Ok(records) if records.is_empty() => HistoryView::Empty,
            Ok(records) => HistoryView::Populated(records),
            Err(err) => HistoryView::Error(format!("{LOAD_FAILURE_PREFIX}{err}")),
        }
    }
}
