//! # Quantity Reconciliation Engine
//!
//! Pure functions that turn an update intent plus the current quantity pair
//! into the next consistent quantity pair, or fail.
//!
//! ## Why One Engine?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Every Mutation Path Funnels Here                       │
//! │                                                                         │
//! │  item update ──► SetBalance ──┐                                        │
//! │  stock set   ──► SetBalance ──┤                                        │
//! │  stock in    ──► Receive    ──┤                                        │
//! │  stock out   ──► Issue      ──┼──► reconcile() ──► Quantities          │
//! │  qty override──► Direct/    ──┤        │                               │
//! │                  SetIn/SetOut │        └─► Err: nothing is written     │
//! │  checkout    ──► Issue ×N   ──┘                                        │
//! │                                                                         │
//! │  The non-negative-balance invariant is enforced HERE and only here.    │
//! │  No caller may write the quantity pair without going through this.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine performs no I/O. Loading the current pair and persisting the
//! new one is the database layer's job; this module only decides what the
//! new pair is and whether the update is legal.

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Quantities
// =============================================================================

/// The persisted quantity state of one item: cumulative receipts and issues.
///
/// Balance is NOT a field. It is always `in_qty - out_qty`, so a
/// `Quantities` value cannot drift out of agreement with itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantities {
    /// Cumulative received quantity. Never negative.
    pub in_qty: i64,
    /// Cumulative issued quantity. Never negative.
    pub out_qty: i64,
}

impl Quantities {
    /// A fresh item: nothing received, nothing issued.
    pub const ZERO: Quantities = Quantities {
        in_qty: 0,
        out_qty: 0,
    };

    /// Current available stock.
    #[inline]
    pub const fn balance(&self) -> i64 {
        self.in_qty - self.out_qty
    }
}

// =============================================================================
// Update Intents
// =============================================================================

/// A single quantity update intent. Intents are mutually exclusive per call.
///
/// | Intent | Effect |
/// |---|---|
/// | `SetBalance(b)` | balance becomes `b`; `out_qty` kept, `in_qty` back-derived as `out_qty + b` |
/// | `SetInQty(v)` | `in_qty` becomes `v`; balance recomputed |
/// | `SetOutQty(v)` | `out_qty` becomes `v`; balance recomputed |
/// | `Direct { .. }` | explicit subset of the three fields; unset fields keep current values |
/// | `Receive(delta)` | `in_qty += delta`, `delta > 0` |
/// | `Issue(delta)` | `out_qty += delta`, `delta > 0`, requires `balance >= delta` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockUpdate {
    /// Set the balance directly. The issue history (`out_qty`) is preserved
    /// and `in_qty` is re-derived so the pair stays consistent.
    SetBalance(i64),

    /// Set the cumulative received quantity.
    SetInQty(i64),

    /// Set the cumulative issued quantity.
    SetOutQty(i64),

    /// Explicit override of any subset of the three fields.
    ///
    /// When `balance` is supplied it wins: `out_qty` (supplied or current) is
    /// kept and `in_qty` is back-derived, exactly like [`StockUpdate::SetBalance`].
    /// A caller-supplied `in_qty` is discarded in that case.
    Direct {
        in_qty: Option<i64>,
        out_qty: Option<i64>,
        balance: Option<i64>,
    },

    /// Record a stock receipt of `delta` units.
    Receive(i64),

    /// Record a stock issue of `delta` units.
    Issue(i64),
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Computes the next quantity pair for `item_no` under `update`.
///
/// This is the sole enforcement point of the ledger invariants:
/// - the resulting balance is never negative
/// - `in_qty` and `out_qty` are never negative
/// - `Receive`/`Issue` deltas must be strictly positive
///
/// `item_no` is only used for error context; the engine itself never loads
/// or stores anything.
///
/// ## Example
/// ```rust
/// use stockpile_core::reconcile::{reconcile, Quantities, StockUpdate};
///
/// let current = Quantities { in_qty: 20, out_qty: 5 };
///
/// let next = reconcile(1, current, StockUpdate::SetBalance(8)).unwrap();
/// assert_eq!(next, Quantities { in_qty: 13, out_qty: 5 });
/// assert_eq!(next.balance(), 8);
/// ```
pub fn reconcile(item_no: i64, current: Quantities, update: StockUpdate) -> CoreResult<Quantities> {
    match update {
        StockUpdate::SetBalance(balance) => {
            if balance < 0 {
                return Err(CoreError::invalid_quantity(
                    item_no,
                    format!("balance must not be negative (got {balance})"),
                ));
            }
            // Balance is primary: preserve the issue history, back-derive
            // receipts so that in_qty - out_qty == balance.
            Ok(Quantities {
                in_qty: current.out_qty + balance,
                out_qty: current.out_qty,
            })
        }

        StockUpdate::SetInQty(in_qty) => {
            if in_qty < 0 {
                return Err(CoreError::invalid_quantity(
                    item_no,
                    format!("in_qty must not be negative (got {in_qty})"),
                ));
            }
            let next = Quantities {
                in_qty,
                out_qty: current.out_qty,
            };
            ensure_non_negative_balance(item_no, next)
        }

        StockUpdate::SetOutQty(out_qty) => {
            if out_qty < 0 {
                return Err(CoreError::invalid_quantity(
                    item_no,
                    format!("out_qty must not be negative (got {out_qty})"),
                ));
            }
            let next = Quantities {
                in_qty: current.in_qty,
                out_qty,
            };
            ensure_non_negative_balance(item_no, next)
        }

        StockUpdate::Direct {
            in_qty,
            out_qty,
            balance,
        } => {
            let next_in = in_qty.unwrap_or(current.in_qty);
            let next_out = out_qty.unwrap_or(current.out_qty);

            if next_in < 0 {
                return Err(CoreError::invalid_quantity(
                    item_no,
                    format!("in_qty must not be negative (got {next_in})"),
                ));
            }
            if next_out < 0 {
                return Err(CoreError::invalid_quantity(
                    item_no,
                    format!("out_qty must not be negative (got {next_out})"),
                ));
            }

            match balance {
                // Supplied balance wins; re-run as SetBalance against the
                // resolved out_qty so the pair stays consistent.
                Some(balance) => reconcile(
                    item_no,
                    Quantities {
                        in_qty: next_in,
                        out_qty: next_out,
                    },
                    StockUpdate::SetBalance(balance),
                ),
                None => ensure_non_negative_balance(
                    item_no,
                    Quantities {
                        in_qty: next_in,
                        out_qty: next_out,
                    },
                ),
            }
        }

        StockUpdate::Receive(delta) => {
            if delta <= 0 {
                return Err(CoreError::invalid_quantity(
                    item_no,
                    format!("receive quantity must be positive (got {delta})"),
                ));
            }
            Ok(Quantities {
                in_qty: current.in_qty + delta,
                out_qty: current.out_qty,
            })
        }

        StockUpdate::Issue(delta) => {
            if delta <= 0 {
                return Err(CoreError::invalid_quantity(
                    item_no,
                    format!("issue quantity must be positive (got {delta})"),
                ));
            }
            let available = current.balance();
            if available < delta {
                return Err(CoreError::InsufficientStock {
                    item_no,
                    available,
                    requested: delta,
                });
            }
            Ok(Quantities {
                in_qty: current.in_qty,
                out_qty: current.out_qty + delta,
            })
        }
    }
}

/// Rejects any pair whose balance would be negative.
fn ensure_non_negative_balance(item_no: i64, next: Quantities) -> CoreResult<Quantities> {
    if next.balance() < 0 {
        return Err(CoreError::invalid_quantity(
            item_no,
            format!(
                "resulting balance would be negative (in_qty {}, out_qty {})",
                next.in_qty, next.out_qty
            ),
        ));
    }
    Ok(next)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: Quantities = Quantities {
        in_qty: 20,
        out_qty: 5,
    };

    fn is_invalid_quantity(result: CoreResult<Quantities>) -> bool {
        matches!(result, Err(CoreError::InvalidQuantity { .. }))
    }

    #[test]
    fn test_set_balance_back_derives_in_qty() {
        let next = reconcile(1, CURRENT, StockUpdate::SetBalance(8)).unwrap();
        assert_eq!(next.in_qty, 13);
        assert_eq!(next.out_qty, 5);
        assert_eq!(next.balance(), 8);
    }

    #[test]
    fn test_set_balance_zero_is_allowed() {
        let next = reconcile(1, CURRENT, StockUpdate::SetBalance(0)).unwrap();
        assert_eq!(next, Quantities { in_qty: 5, out_qty: 5 });
        assert_eq!(next.balance(), 0);
    }

    #[test]
    fn test_set_balance_rejects_negative() {
        assert!(is_invalid_quantity(reconcile(
            1,
            CURRENT,
            StockUpdate::SetBalance(-1)
        )));
    }

    #[test]
    fn test_set_in_qty() {
        let next = reconcile(1, CURRENT, StockUpdate::SetInQty(30)).unwrap();
        assert_eq!(next, Quantities { in_qty: 30, out_qty: 5 });
        assert_eq!(next.balance(), 25);
    }

    #[test]
    fn test_set_in_qty_below_issues_rejected() {
        // out_qty is 5; an in_qty of 4 would commit a negative balance
        assert!(is_invalid_quantity(reconcile(
            1,
            CURRENT,
            StockUpdate::SetInQty(4)
        )));
        // equal to out_qty is fine (balance 0)
        let next = reconcile(1, CURRENT, StockUpdate::SetInQty(5)).unwrap();
        assert_eq!(next.balance(), 0);
    }

    #[test]
    fn test_set_out_qty() {
        let next = reconcile(1, CURRENT, StockUpdate::SetOutQty(20)).unwrap();
        assert_eq!(next.balance(), 0);

        assert!(is_invalid_quantity(reconcile(
            1,
            CURRENT,
            StockUpdate::SetOutQty(21)
        )));
        assert!(is_invalid_quantity(reconcile(
            1,
            CURRENT,
            StockUpdate::SetOutQty(-1)
        )));
    }

    #[test]
    fn test_direct_unset_fields_keep_current() {
        let next = reconcile(
            1,
            CURRENT,
            StockUpdate::Direct {
                in_qty: None,
                out_qty: None,
                balance: None,
            },
        )
        .unwrap();
        assert_eq!(next, CURRENT);
    }

    #[test]
    fn test_direct_subset_recomputes_balance() {
        let next = reconcile(
            1,
            CURRENT,
            StockUpdate::Direct {
                in_qty: Some(50),
                out_qty: None,
                balance: None,
            },
        )
        .unwrap();
        assert_eq!(next, Quantities { in_qty: 50, out_qty: 5 });
        assert_eq!(next.balance(), 45);
    }

    #[test]
    fn test_direct_supplied_balance_wins() {
        // in_qty 100 is discarded: balance is primary and out_qty is kept
        let next = reconcile(
            1,
            CURRENT,
            StockUpdate::Direct {
                in_qty: Some(100),
                out_qty: Some(10),
                balance: Some(7),
            },
        )
        .unwrap();
        assert_eq!(next, Quantities { in_qty: 17, out_qty: 10 });
        assert_eq!(next.balance(), 7);
    }

    #[test]
    fn test_direct_rejects_negative_results() {
        assert!(is_invalid_quantity(reconcile(
            1,
            CURRENT,
            StockUpdate::Direct {
                in_qty: Some(3),
                out_qty: None,
                balance: None,
            },
        )));
        assert!(is_invalid_quantity(reconcile(
            1,
            CURRENT,
            StockUpdate::Direct {
                in_qty: None,
                out_qty: Some(-2),
                balance: None,
            },
        )));
        assert!(is_invalid_quantity(reconcile(
            1,
            CURRENT,
            StockUpdate::Direct {
                in_qty: None,
                out_qty: None,
                balance: Some(-5),
            },
        )));
    }

    #[test]
    fn test_receive_adds_to_in_qty() {
        let next = reconcile(1, CURRENT, StockUpdate::Receive(10)).unwrap();
        assert_eq!(next, Quantities { in_qty: 30, out_qty: 5 });
        assert_eq!(next.balance(), 25);
    }

    #[test]
    fn test_receive_rejects_non_positive_delta() {
        assert!(is_invalid_quantity(reconcile(
            1,
            CURRENT,
            StockUpdate::Receive(0)
        )));
        assert!(is_invalid_quantity(reconcile(
            1,
            CURRENT,
            StockUpdate::Receive(-3)
        )));
    }

    #[test]
    fn test_issue_adds_to_out_qty() {
        let next = reconcile(1, CURRENT, StockUpdate::Issue(15)).unwrap();
        assert_eq!(next, Quantities { in_qty: 20, out_qty: 20 });
        assert_eq!(next.balance(), 0);
    }

    #[test]
    fn test_issue_rejects_insufficient_stock() {
        let err = reconcile(7, CURRENT, StockUpdate::Issue(16)).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                item_no,
                available,
                requested,
            } => {
                assert_eq!(item_no, 7);
                assert_eq!(available, 15);
                assert_eq!(requested, 16);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[test]
    fn test_issue_rejects_non_positive_delta() {
        assert!(is_invalid_quantity(reconcile(
            1,
            CURRENT,
            StockUpdate::Issue(0)
        )));
        assert!(is_invalid_quantity(reconcile(
            1,
            CURRENT,
            StockUpdate::Issue(-4)
        )));
    }

    #[test]
    fn test_invariants_hold_after_every_accepted_update() {
        let updates = [
            StockUpdate::SetBalance(0),
            StockUpdate::SetBalance(100),
            StockUpdate::SetInQty(5),
            StockUpdate::SetOutQty(0),
            StockUpdate::Direct {
                in_qty: Some(40),
                out_qty: Some(12),
                balance: None,
            },
            StockUpdate::Receive(1),
            StockUpdate::Issue(15),
        ];
        for update in updates {
            let next = reconcile(1, CURRENT, update).unwrap();
            assert!(next.in_qty >= 0, "{update:?}");
            assert!(next.out_qty >= 0, "{update:?}");
            assert!(next.balance() >= 0, "{update:?}");
        }
    }
}
