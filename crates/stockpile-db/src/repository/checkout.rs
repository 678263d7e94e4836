//! # Checkout Repository
//!
//! Applies a batch of stock issues as one all-or-nothing unit.
//!
//! ## Batch Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Batch Lifecycle                           │
//! │                                                                         │
//! │  CheckoutRequest { lines: [{A,5}, {B,3}], checkout_by, notes }         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN ─── one transaction for the whole batch                         │
//! │    │                                                                    │
//! │    ├── line 1: load A → reconcile Issue(5) → UPDATE A                  │
//! │    ├── line 2: load B → reconcile Issue(3) → UPDATE B                  │
//! │    │               │                                                    │
//! │    │               └── any failure? → ROLLBACK                          │
//! │    │                   A's decrement is discarded too - the error       │
//! │    │                   names the offending item_no                      │
//! │    ▼                                                                    │
//! │  COMMIT ── both decrements become visible together                     │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  CheckoutReceipt { batch_id, per-line before/after balances }          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are processed strictly in request order; with several invalid lines
//! the first one in that order is the error surfaced. The batch itself is
//! transient - nothing but the items' quantity pairs is persisted.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::LedgerResult;
use crate::repository::item::ItemRepository;
use stockpile_core::reconcile::{reconcile, StockUpdate};
use stockpile_core::{
    CheckoutLineResult, CheckoutReceipt, CheckoutRequest, CoreError, Item, ValidationError,
    MAX_CHECKOUT_LINES,
};

/// Repository for checkout batch operations.
#[derive(Debug, Clone)]
pub struct CheckoutRepository {
    pool: SqlitePool,
}

impl CheckoutRepository {
    /// Creates a new CheckoutRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CheckoutRepository { pool }
    }

    /// Applies a checkout batch atomically.
    ///
    /// ## Guarantees
    /// - All line decrements commit together, or none do
    /// - Lines are applied in request order
    /// - The first failing line aborts the batch; its error carries the
    ///   offending `item_no` and, for shortfalls, available vs. requested
    ///
    /// ## Returns
    /// A receipt with one entry per line (request order), the batch id and
    /// timestamp, and the actor/notes metadata echoed back.
    pub async fn checkout(&self, request: CheckoutRequest) -> LedgerResult<CheckoutReceipt> {
        if request.lines.is_empty() {
            return Err(ValidationError::required("lines").into());
        }
        if request.lines.len() > MAX_CHECKOUT_LINES {
            return Err(CoreError::CheckoutTooLarge {
                max: MAX_CHECKOUT_LINES,
            }
            .into());
        }

        debug!(lines = request.lines.len(), "Starting checkout batch");

        let mut tx = self.pool.begin().await?;
        let mut results = Vec::with_capacity(request.lines.len());

        for line in &request.lines {
            let row = ItemRepository::load(&mut tx, line.item_no).await?;
            let current = row.quantities();
            let item: Item = row.into();

            // The engine guards positivity and sufficiency; an Err here
            // drops the transaction and every staged decrement with it.
            let next = reconcile(line.item_no, current, StockUpdate::Issue(line.quantity))?;
            ItemRepository::write_quantities(&mut tx, line.item_no, next).await?;

            results.push(CheckoutLineResult {
                item_no: line.item_no,
                item_name: item.item_name,
                quantity: line.quantity,
                balance_before: current.balance(),
                balance_after: next.balance(),
            });
        }

        tx.commit().await?;

        let receipt = CheckoutReceipt {
            batch_id: Uuid::new_v4().to_string(),
            checked_out_at: Utc::now(),
            checkout_by: request.checkout_by,
            notes: request.notes,
            lines: results,
        };

        info!(
            batch_id = %receipt.batch_id,
            lines = receipt.lines.len(),
            checkout_by = receipt.checkout_by.as_deref().unwrap_or("-"),
            "Checkout committed"
        );

        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
