//! Snapshot history.
//!
//! A [`History`] is the ordered list of saved calculations for one fund. It
//! only stores valuation inputs and the net invested figure at save time;
//! derived rates are computed on demand by `effrate-analytics`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, EffRateError, EffRateResult};
use crate::ledger;
use crate::types::{CashMovement, Date, Snapshot};

/// Saved calculations, in save order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves the current calculation.
    ///
    /// The net invested of `ledger` is captured into the snapshot so later
    /// ledger edits do not change this snapshot's profit.
    ///
    /// # Errors
    ///
    /// `EffRateError::SnapshotRejected` when the ledger is empty, no valuation
    /// date is set, or the current value is missing or not above zero.
    pub fn save(
        &mut self,
        ledger: &[CashMovement],
        valuation_date: Option<Date>,
        current_value: Option<f64>,
        now: DateTime<Utc>,
    ) -> EffRateResult<&Snapshot> {
        if ledger.is_empty() {
            return Err(EffRateError::snapshot_rejected(
                "add at least one cash flow before saving",
            ));
        }
        let Some(valuation_date) = valuation_date else {
            return Err(EffRateError::snapshot_rejected(
                "set a valuation date before saving a snapshot",
            ));
        };
        let current_value = match current_value {
            Some(value) if ensure_finite("current value", value)? > 0.0 => value,
            _ => {
                return Err(EffRateError::snapshot_rejected(
                    "enter a current fund value greater than 0 before saving a snapshot",
                ))
            }
        };
        ledger::validate(ledger)?;

        let snapshot = Snapshot::new(now, valuation_date, current_value)
            .with_net_invested(ledger::net_invested(ledger));
        log::debug!(
            "saved snapshot for {} (value {}, net invested {:?})",
            snapshot.valuation_date,
            snapshot.current_value,
            snapshot.net_invested
        );

        self.snapshots.push(snapshot);
        Ok(&self.snapshots[self.snapshots.len() - 1])
    }

    /// Changes the valuation date and value of a snapshot.
    ///
    /// Editing drops the persisted net invested figure, so the edited snapshot
    /// is reconciled against the live ledger from then on.
    ///
    /// # Errors
    ///
    /// `EffRateError::SnapshotRejected` when the current value is not above
    /// zero and `EffRateError::SnapshotNotFound` for an out-of-range index.
    pub fn edit(
        &mut self,
        index: usize,
        valuation_date: Date,
        current_value: f64,
    ) -> EffRateResult<&Snapshot> {
        if ensure_finite("current value", current_value)? <= 0.0 {
            return Err(EffRateError::snapshot_rejected(
                "a snapshot's current fund value must be greater than 0",
            ));
        }
        let len = self.snapshots.len();
        let snapshot = self
            .snapshots
            .get_mut(index)
            .ok_or(EffRateError::SnapshotNotFound { index, len })?;

        snapshot.valuation_date = valuation_date;
        snapshot.current_value = current_value;
        snapshot.net_invested = None;
        Ok(&*snapshot)
    }

    /// Removes and returns a snapshot.
    pub fn delete(&mut self, index: usize) -> EffRateResult<Snapshot> {
        if index >= self.snapshots.len() {
            return Err(EffRateError::SnapshotNotFound {
                index,
                len: self.snapshots.len(),
            });
        }
        Ok(self.snapshots.remove(index))
    }

    /// Appends an already-built snapshot (e.g. one read from a file).
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    /// Returns the snapshot at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// All snapshots in save order.
    #[must_use]
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Snapshots ordered by valuation date (stable for equal dates).
    #[must_use]
    pub fn sorted_by_valuation_date(&self) -> Vec<&Snapshot> {
        let mut sorted: Vec<&Snapshot> = self.snapshots.iter().collect();
        sorted.sort_by_key(|s| s.valuation_date);
        sorted
    }

    /// Number of snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True when nothing has been saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl From<Vec<Snapshot>> for History {
    fn from(snapshots: Vec<Snapshot>) -> Self {
        Self { snapshots }
    }
}
