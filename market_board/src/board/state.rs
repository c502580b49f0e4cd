//! Board state machine and the snapshot observers receive.

use chrono::{DateTime, Utc};
use quote_feed::DisplayRecord;
use serde::Serialize;

use crate::demo::sample_records;

/// Banner shown whenever a live fetch fails.
pub const FETCH_FAILED: &str = "Failed to fetch live market data";

/// Where the board is in its lifecycle.
///
/// `Live` never returns on its own once the board has fallen back to `Demo`;
/// only a fresh initialization can get there again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardState {
    /// Nothing has run yet.
    #[default]
    Uninitialized,
    /// Probing the vendor and loading the first batch.
    Connecting,
    /// Showing vendor data and polling on every tick.
    Live,
    /// Showing the fixed sample table; no polling.
    Demo,
}

/// Everything a front-end needs to draw the board.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardSnapshot {
    /// Current lifecycle state.
    pub state: BoardState,
    /// Rows in watch-list order.
    pub records: Vec<DisplayRecord>,
    /// Banner text; `None` hides it.
    pub error: Option<String>,
    /// Time of the last successful live fetch.
    pub last_updated: Option<DateTime<Utc>>,
}

impl BoardSnapshot {
    /// `true` while the board is polling the vendor.
    pub fn is_live(&self) -> bool {
        self.state == BoardState::Live
    }

    /// Short label for the mode indicator.
    pub fn mode_label(&self) -> &'static str {
        match self.state {
            BoardState::Uninitialized => "Idle",
            BoardState::Connecting => "Connecting",
            BoardState::Live => "Live",
            BoardState::Demo => "Demo",
        }
    }

    pub(crate) fn begin_connecting(&mut self) {
        self.state = BoardState::Connecting;
        self.error = None;
    }

    pub(crate) fn enter_demo(&mut self, banner: Option<String>) {
        self.state = BoardState::Demo;
        self.records = sample_records();
        self.error = banner;
    }

    pub(crate) fn apply_live(&mut self, records: Vec<DisplayRecord>, at: DateTime<Utc>) {
        self.state = BoardState::Live;
        self.records = records;
        self.error = None;
        self.last_updated = Some(at);
    }

    /// A failed poll keeps whatever rows are on screen. With nothing to keep
    /// the board drops to the sample table.
    pub(crate) fn apply_poll_failure(&mut self) {
        if self.records.is_empty() {
            self.enter_demo(Some(FETCH_FAILED.to_string()));
        } else {
            self.error = Some(FETCH_FAILED.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pair: &str) -> DisplayRecord {
        DisplayRecord {
            pair: pair.into(),
            price: 10.0,
            change: 0.5,
            change_percent: 5.0,
            high: 11.0,
            low: 9.0,
            spread: 0.02,
            volume: 0,
        }
    }

    #[test]
    fn starts_uninitialized_and_empty() {
        let snap = BoardSnapshot::default();
        assert_eq!(snap.state, BoardState::Uninitialized);
        assert!(snap.records.is_empty());
        assert!(snap.error.is_none());
        assert_eq!(snap.mode_label(), "Idle");
    }

    #[test]
    fn live_update_clears_banner() {
        let mut snap = BoardSnapshot {
            error: Some(FETCH_FAILED.into()),
            ..Default::default()
        };
        let at = Utc::now();
        snap.apply_live(vec![row("AAPL")], at);

        assert!(snap.is_live());
        assert!(snap.error.is_none());
        assert_eq!(snap.last_updated, Some(at));
    }

    #[test]
    fn poll_failure_keeps_existing_rows() {
        let mut snap = BoardSnapshot::default();
        snap.apply_live(vec![row("AAPL"), row("MSFT")], Utc::now());
        let before = snap.records.clone();

        snap.apply_poll_failure();

        assert_eq!(snap.state, BoardState::Live);
        assert_eq!(snap.records, before);
        assert_eq!(snap.error.as_deref(), Some(FETCH_FAILED));
    }

    #[test]
    fn poll_failure_without_rows_falls_back_to_sample() {
        let mut snap = BoardSnapshot {
            state: BoardState::Live,
            ..Default::default()
        };
        snap.apply_poll_failure();

        assert_eq!(snap.state, BoardState::Demo);
        assert_eq!(snap.records, sample_records());
        assert_eq!(snap.error.as_deref(), Some(FETCH_FAILED));
    }

    #[test]
    fn connecting_hides_the_banner_but_keeps_rows() {
        let mut snap = BoardSnapshot::default();
        snap.enter_demo(Some(FETCH_FAILED.into()));
        snap.begin_connecting();

        assert_eq!(snap.state, BoardState::Connecting);
        assert!(snap.error.is_none());
        assert_eq!(snap.records.len(), 6);
    }
}
