//! # Domain Types
//!
//! Core domain types used throughout Stockpile.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │ CheckoutRequest │   │ BulkCreateReport│       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  item_no (i64)  │   │  lines[]        │   │  created[]      │       │
//! │  │  item_name      │   │  checkout_by    │   │  failures[]     │       │
//! │  │  in_qty/out_qty │   │  notes          │   │  summary        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ItemStatus    │   │   UpdateType    │   │ CheckoutReceipt │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Out Of Stock   │   │  set_balance    │   │  batch_id       │       │
//! │  │  Low In Stock   │   │  adjust_in      │   │  lines[]        │       │
//! │  │  In Stock       │   │  adjust_out     │   │  timestamp      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived, Never Stored
//! Only `(in_qty, out_qty)` plus descriptive fields are persisted. `balance`,
//! `cost`, `deficit` and `item_status` are methods on [`Item`] so they are
//! recomputed on every read and can never drift from the quantities that
//! produce them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::reconcile::Quantities;

// =============================================================================
// Item Status
// =============================================================================

/// Stock level classification of an item.
///
/// A pure function of `(balance, min_stock)` - never stored independently.
/// Serializes to the exact strings the UI displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ItemStatus {
    /// Balance is zero (or would be negative, which no operation commits).
    #[serde(rename = "Out Of Stock")]
    OutOfStock,
    /// Balance is at or below the reorder threshold.
    #[serde(rename = "Low In Stock")]
    LowInStock,
    /// Balance is above the reorder threshold.
    #[serde(rename = "In Stock")]
    InStock,
}

impl ItemStatus {
    /// Classifies a balance against a minimum-stock threshold.
    ///
    /// `balance == min_stock` counts as low: the threshold is a reorder
    /// trigger, not a shortfall.
    pub const fn for_balance(balance: i64, min_stock: i64) -> ItemStatus {
        if balance <= 0 {
            ItemStatus::OutOfStock
        } else if balance <= min_stock {
            ItemStatus::LowInStock
        } else {
            ItemStatus::InStock
        }
    }

    /// Returns the display string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::OutOfStock => "Out Of Stock",
            ItemStatus::LowInStock => "Low In Stock",
            ItemStatus::InStock => "In Stock",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Item
// =============================================================================

/// The ledger record for one stock-keeping unit.
///
/// `item_no` is assigned at creation and never reused. The descriptive
/// fields are opaque to the ledger logic; only the quantity pair is governed
/// by the reconciliation engine.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Stable numeric identifier, assigned at creation.
    pub item_no: i64,

    /// Display name. Required, non-empty.
    pub item_name: String,

    /// Manufacturer or brand label.
    pub brand: String,

    /// Free-form category (e.g. "Consumable", "Hardware").
    pub item_type: String,

    /// Storage location (shelf, room, warehouse).
    pub location: String,

    /// Unit the quantities count in (pcs, box, liter, ...).
    pub unit_of_measure: String,

    /// Supplier name.
    pub supplier: String,

    /// Reference of the last purchase order that touched this item.
    pub last_po: String,

    /// Per-unit price in cents.
    pub price_per_unit_cents: i64,

    /// Reorder threshold; balances at or below it are flagged low.
    pub min_stock: i64,

    /// Cumulative received quantity.
    pub in_qty: i64,

    /// Cumulative issued quantity.
    pub out_qty: i64,

    /// When the item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Current available stock.
    #[inline]
    pub const fn balance(&self) -> i64 {
        self.in_qty - self.out_qty
    }

    /// Returns the per-unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_per_unit_cents)
    }

    /// Value of the stock on hand: `balance × price_per_unit`.
    #[inline]
    pub fn cost(&self) -> Money {
        self.price().multiply_quantity(self.balance())
    }

    /// Shortfall below the reorder threshold, zero when at or above it.
    #[inline]
    pub fn deficit(&self) -> i64 {
        (self.min_stock - self.balance()).max(0)
    }

    /// Stock level classification.
    #[inline]
    pub fn status(&self) -> ItemStatus {
        ItemStatus::for_balance(self.balance(), self.min_stock)
    }

    /// The quantity pair, as the reconciliation engine consumes it.
    #[inline]
    pub const fn quantities(&self) -> Quantities {
        Quantities {
            in_qty: self.in_qty,
            out_qty: self.out_qty,
        }
    }
}

// =============================================================================
// Item View
// =============================================================================

/// Full projection of an [`Item`] with the derived fields materialized.
///
/// This is the shape the shell boundary serializes to the UI. Building it
/// through `From<&Item>` is the only way to get one, so the derived fields
/// always agree with the quantities.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemView {
    pub item_no: i64,
    pub item_name: String,
    pub brand: String,
    pub item_type: String,
    pub location: String,
    pub unit_of_measure: String,
    pub supplier: String,
    pub last_po: String,
    pub price_per_unit_cents: i64,
    pub min_stock: i64,
    pub in_qty: i64,
    pub out_qty: i64,
    /// Derived: `in_qty - out_qty`.
    pub balance: i64,
    /// Derived: `balance × price_per_unit`, in cents.
    pub cost_cents: i64,
    /// Derived: `max(0, min_stock - balance)`.
    pub deficit: i64,
    /// Derived from balance and min_stock.
    pub item_status: ItemStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        ItemView {
            item_no: item.item_no,
            item_name: item.item_name.clone(),
            brand: item.brand.clone(),
            item_type: item.item_type.clone(),
            location: item.location.clone(),
            unit_of_measure: item.unit_of_measure.clone(),
            supplier: item.supplier.clone(),
            last_po: item.last_po.clone(),
            price_per_unit_cents: item.price_per_unit_cents,
            min_stock: item.min_stock,
            in_qty: item.in_qty,
            out_qty: item.out_qty,
            balance: item.balance(),
            cost_cents: item.cost().cents(),
            deficit: item.deficit(),
            item_status: item.status(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

// =============================================================================
// Item Input
// =============================================================================

/// Creation / full-update payload for an item.
///
/// Descriptive fields default to empty string / zero when omitted. `balance`
/// is the desired stock level: on create it becomes `in_qty` wholesale; on a
/// full update the cumulative `out_qty` is preserved and `in_qty` is
/// re-derived (any caller-supplied `in_qty` has no field here by design).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemInput {
    /// Required, non-empty.
    pub item_name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub item_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub unit_of_measure: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub last_po: String,
    #[serde(default)]
    pub price_per_unit_cents: i64,
    #[serde(default)]
    pub min_stock: i64,
    /// Desired stock level. Must not be negative.
    #[serde(default)]
    pub balance: i64,
}

// =============================================================================
// Quantity Update
// =============================================================================

/// Sub-intent selector for the quantity-override operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    /// Set the balance; `in_qty` is back-derived.
    SetBalance,
    /// Set the cumulative received quantity.
    AdjustIn,
    /// Set the cumulative issued quantity.
    AdjustOut,
}

/// Quantity-override payload.
///
/// `update_type` picks the sub-intent; when unspecified, the supplied subset
/// of fields is applied directly. At least one quantity field is required.
/// When `balance` is supplied on the direct path it wins over `in_qty`
/// (balance is primary, `in_qty` is back-derived from `out_qty + balance`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuantityUpdate {
    #[serde(default)]
    pub update_type: Option<UpdateType>,
    #[serde(default)]
    pub in_qty: Option<i64>,
    #[serde(default)]
    pub out_qty: Option<i64>,
    #[serde(default)]
    pub balance: Option<i64>,
}

// =============================================================================
// Checkout
// =============================================================================

/// One decrement request inside a checkout batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutLine {
    pub item_no: i64,
    /// Units to issue. Must be strictly positive.
    pub quantity: i64,
}

/// A batch of stock issues applied as one all-or-nothing unit.
///
/// The batch itself is transient: it is evaluated against the item set and
/// discarded; only the items' quantity pairs change.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    /// Processed strictly in this order.
    pub lines: Vec<CheckoutLine>,
    /// Who performed the checkout.
    #[serde(default)]
    pub checkout_by: Option<String>,
    /// Free-form note attached to the receipt.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Per-line outcome of a committed checkout.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutLineResult {
    pub item_no: i64,
    pub item_name: String,
    pub quantity: i64,
    pub balance_before: i64,
    pub balance_after: i64,
}

/// Result of a committed checkout batch.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutReceipt {
    /// Batch identifier (UUID v4), generated at commit time.
    pub batch_id: String,
    #[ts(as = "String")]
    pub checked_out_at: DateTime<Utc>,
    pub checkout_by: Option<String>,
    pub notes: Option<String>,
    /// One entry per request line, in request order.
    pub lines: Vec<CheckoutLineResult>,
}

// =============================================================================
// Bulk Create
// =============================================================================

/// One failed row of a bulk create.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkCreateFailure {
    /// Index of the row in the request array.
    pub index: usize,
    /// Human-readable failure reason.
    pub error: String,
    /// The payload as submitted, echoed back for correction.
    pub original: ItemInput,
}

/// Attempted/succeeded/failed counts of a bulk create.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkCreateSummary {
    pub attempted: usize,
    pub successful: usize,
    pub failed: usize,
}

/// Outcome of a bulk create.
///
/// Bulk creation is deliberately NOT atomic: rows succeed or fail
/// independently and earlier successes are never rolled back. Callers rely
/// on this partial-success reporting.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkCreateReport {
    pub created: Vec<Item>,
    pub failures: Vec<BulkCreateFailure>,
    pub summary: BulkCreateSummary,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(in_qty: i64, out_qty: i64, min_stock: i64, price_cents: i64) -> Item {
        let now = Utc::now();
        Item {
            item_no: 1,
            item_name: "M6 Hex Bolt".to_string(),
            brand: "Fastenal".to_string(),
            item_type: "Hardware".to_string(),
            location: "Shelf A-3".to_string(),
            unit_of_measure: "pcs".to_string(),
            supplier: "Fastenal Inc".to_string(),
            last_po: "PO-1042".to_string(),
            price_per_unit_cents: price_cents,
            min_stock,
            in_qty,
            out_qty,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(ItemStatus::for_balance(0, 5), ItemStatus::OutOfStock);
        assert_eq!(ItemStatus::for_balance(1, 5), ItemStatus::LowInStock);
        assert_eq!(ItemStatus::for_balance(5, 5), ItemStatus::LowInStock);
        assert_eq!(ItemStatus::for_balance(6, 5), ItemStatus::InStock);
        // min_stock 0: any positive balance is in stock
        assert_eq!(ItemStatus::for_balance(0, 0), ItemStatus::OutOfStock);
        assert_eq!(ItemStatus::for_balance(1, 0), ItemStatus::InStock);
    }

    #[test]
    fn test_status_serializes_to_display_strings() {
        assert_eq!(
            serde_json::to_string(&ItemStatus::OutOfStock).unwrap(),
            "\"Out Of Stock\""
        );
        assert_eq!(
            serde_json::to_string(&ItemStatus::LowInStock).unwrap(),
            "\"Low In Stock\""
        );
        assert_eq!(
            serde_json::to_string(&ItemStatus::InStock).unwrap(),
            "\"In Stock\""
        );
    }

    #[test]
    fn test_derived_fields() {
        let item = item(30, 5, 10, 299);
        assert_eq!(item.balance(), 25);
        assert_eq!(item.cost().cents(), 25 * 299);
        assert_eq!(item.deficit(), 0);
        assert_eq!(item.status(), ItemStatus::InStock);
    }

    #[test]
    fn test_deficit_below_threshold() {
        let item = item(10, 7, 10, 100);
        assert_eq!(item.balance(), 3);
        assert_eq!(item.deficit(), 7);
        assert_eq!(item.status(), ItemStatus::LowInStock);
    }

    #[test]
    fn test_view_matches_item() {
        let item = item(20, 5, 20, 150);
        let view = ItemView::from(&item);
        assert_eq!(view.balance, 15);
        assert_eq!(view.cost_cents, 15 * 150);
        assert_eq!(view.deficit, 5);
        assert_eq!(view.item_status, ItemStatus::LowInStock);
        assert_eq!(view.item_name, item.item_name);
    }

    #[test]
    fn test_item_input_defaults() {
        let input: ItemInput = serde_json::from_str(r#"{"item_name":"Glue"}"#).unwrap();
        assert_eq!(input.item_name, "Glue");
        assert_eq!(input.brand, "");
        assert_eq!(input.balance, 0);
        assert_eq!(input.min_stock, 0);
    }

    #[test]
    fn test_update_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&UpdateType::SetBalance).unwrap(),
            "\"set_balance\""
        );
        let parsed: UpdateType = serde_json::from_str("\"adjust_out\"").unwrap();
        assert_eq!(parsed, UpdateType::AdjustOut);
    }
}
