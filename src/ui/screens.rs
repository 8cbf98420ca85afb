use std::cmp::min;

use crate::config::DisplayOptions;
use crate::models::StoredTune;
use crate::query::TuneQuery;

/// Rows matched by one query, capped by the display options.
pub(crate) struct ResultsScreen {
    pub(crate) query: TuneQuery,
    pub(crate) rows: Vec<StoredTune>,
    /// Match count before `max_rows` was applied.
    pub(crate) total: usize,
    pub(crate) selected: usize,
}

impl ResultsScreen {
    pub(crate) fn new(query: TuneQuery, matches: &[&StoredTune], display: &DisplayOptions) -> Self {
        let total = matches.len();
        let shown = display.max_rows.map_or(total, |limit| min(limit, total));
        Self {
            query,
            rows: matches[..shown].iter().map(|tune| (*tune).clone()).collect(),
            total,
            selected: 0,
        }
    }

    pub(crate) fn is_truncated(&self) -> bool {
        self.rows.len() < self.total
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.rows.len() - 1;
        let next = self.selected as isize + offset;
        self.selected = next.clamp(0, last as isize) as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }
}
