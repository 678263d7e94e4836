//! # Item Repository
//!
//! Database operations for the stock ledger.
//!
//! ## Mutation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Every Stock Mutation Is One Transaction                    │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ├── SELECT current (in_qty, out_qty)      ← load                    │
//! │    │                                                                    │
//! │    ├── reconcile(current, intent)            ← pure, stockpile-core    │
//! │    │        │                                                           │
//! │    │        └── Err? → ROLLBACK, nothing written                        │
//! │    │                                                                    │
//! │    ├── UPDATE items SET in_qty, out_qty      ← persist                 │
//! │    │                                                                    │
//! │    └── SELECT the row again                  ← re-read, returned       │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Two concurrent stock-outs against the same item cannot both read the  │
//! │  same stale balance: the read-modify-write span is serialized by the   │
//! │  store, not by in-process locks.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult, LedgerResult};
use stockpile_core::reconcile::{reconcile, Quantities, StockUpdate};
use stockpile_core::validation;
use stockpile_core::{
    BulkCreateFailure, BulkCreateReport, BulkCreateSummary, CoreError, Item, ItemInput,
    QuantityUpdate, UpdateType, ValidationError,
};

/// Column list shared by every SELECT, in `ItemRow` field order.
const SELECT_ITEM: &str = "SELECT item_no, item_name, brand, item_type, location, \
     unit_of_measure, supplier, last_po, price_per_unit_cents, min_stock, \
     in_qty, out_qty, created_at, updated_at FROM items";

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw `items` row. Only persisted fields - the derived fields are computed
/// by [`Item`] when the row is projected.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ItemRow {
    item_no: i64,
    item_name: String,
    brand: String,
    item_type: String,
    location: String,
    unit_of_measure: String,
    supplier: String,
    last_po: String,
    price_per_unit_cents: i64,
    min_stock: i64,
    in_qty: i64,
    out_qty: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ItemRow {
    pub(crate) fn quantities(&self) -> Quantities {
        Quantities {
            in_qty: self.in_qty,
            out_qty: self.out_qty,
        }
    }
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            item_no: row.item_no,
            item_name: row.item_name,
            brand: row.brand,
            item_type: row.item_type,
            location: row.location,
            unit_of_measure: row.unit_of_measure,
            supplier: row.supplier,
            last_po: row.last_po,
            price_per_unit_cents: row.price_per_unit_cents,
            min_stock: row.min_stock,
            in_qty: row.in_qty,
            out_qty: row.out_qty,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ItemRepository::new(pool);
///
/// let item = repo.create(input).await?;
/// let item = repo.stock_out(item.item_no, 5).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Gets an item by its number.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get(&self, item_no: i64) -> DbResult<Option<Item>> {
        let sql = format!("{SELECT_ITEM} WHERE item_no = ?1");
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(item_no)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Item::from))
    }

    /// Lists items sorted by name.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Item>> {
        let sql = format!("{SELECT_ITEM} ORDER BY item_name LIMIT ?1");
        let rows = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Searches items by name, brand or type.
    ///
    /// An empty query falls back to [`ItemRepository::list`].
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Item>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching items");

        if query.is_empty() {
            return self.list(limit).await;
        }

        let pattern = format!("%{query}%");
        let sql = format!(
            "{SELECT_ITEM} WHERE item_name LIKE ?1 OR brand LIKE ?1 OR item_type LIKE ?1 \
             ORDER BY item_name LIMIT ?2"
        );
        let rows = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(pattern)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Search returned items");
        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Counts all items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Create
    // -------------------------------------------------------------------------

    /// Inserts a new item.
    ///
    /// The initial stock level IS the full inbound quantity: `in_qty` starts
    /// at `balance` and `out_qty` at zero. `item_no` is assigned by the
    /// store and never reused.
    pub async fn create(&self, input: ItemInput) -> LedgerResult<Item> {
        validation::validate_item_input(&input)?;

        debug!(item_name = %input.item_name, balance = input.balance, "Creating item");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO items (item_name, brand, item_type, location, unit_of_measure, \
             supplier, last_po, price_per_unit_cents, min_stock, in_qty, out_qty, \
             created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(&input.item_name)
        .bind(&input.brand)
        .bind(&input.item_type)
        .bind(&input.location)
        .bind(&input.unit_of_measure)
        .bind(&input.supplier)
        .bind(&input.last_po)
        .bind(input.price_per_unit_cents)
        .bind(input.min_stock)
        .bind(input.balance) // in_qty
        .bind(0i64) // out_qty
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        let item_no = result.last_insert_rowid();
        let row = Self::load(&mut tx, item_no).await?;
        tx.commit().await?;

        info!(item_no, item_name = %row.item_name, balance = row.quantities().balance(), "Item created");
        Ok(row.into())
    }

    /// Creates many items independently, collecting partial success.
    ///
    /// Deliberately NOT atomic: each row is validated and inserted on its
    /// own, a failed row is recorded with its index and the original payload,
    /// and earlier successes are never rolled back. Callers rely on the
    /// partial-success report, so do not wrap this in a transaction.
    ///
    /// If the returned future is dropped mid-batch, rows inserted before the
    /// cancel point remain - there is no rollback scope to undo them.
    pub async fn bulk_create(&self, rows: Vec<ItemInput>) -> BulkCreateReport {
        let attempted = rows.len();
        let mut created = Vec::new();
        let mut failures = Vec::new();

        for (index, input) in rows.into_iter().enumerate() {
            match self.create(input.clone()).await {
                Ok(item) => created.push(item),
                Err(err) => failures.push(BulkCreateFailure {
                    index,
                    error: err.to_string(),
                    original: input,
                }),
            }
        }

        let successful = created.len();
        let failed = failures.len();
        info!(attempted, successful, failed, "Bulk create finished");

        BulkCreateReport {
            created,
            failures,
            summary: BulkCreateSummary {
                attempted,
                successful,
                failed,
            },
        }
    }

    // -------------------------------------------------------------------------
    // Stock Mutations
    // -------------------------------------------------------------------------

    /// Replaces all descriptive fields and sets the target stock level.
    ///
    /// The issue history is preserved: `in_qty` is re-derived as
    /// `balance + existing out_qty`, so editing the balance on this path
    /// means "set the desired stock level while keeping cumulative issues
    /// intact". A caller-supplied raw `in_qty` is NOT accepted here - use
    /// [`ItemRepository::set_quantities`] with `adjust_in` for that.
    pub async fn update(&self, item_no: i64, input: ItemInput) -> LedgerResult<Item> {
        validation::validate_item_input(&input)?;

        debug!(item_no, item_name = %input.item_name, "Updating item");

        let mut tx = self.pool.begin().await?;
        let row = Self::load(&mut tx, item_no).await?;
        let next = reconcile(item_no, row.quantities(), StockUpdate::SetBalance(input.balance))?;

        let now = Utc::now();
        sqlx::query(
            "UPDATE items SET item_name = ?2, brand = ?3, item_type = ?4, location = ?5, \
             unit_of_measure = ?6, supplier = ?7, last_po = ?8, price_per_unit_cents = ?9, \
             min_stock = ?10, in_qty = ?11, out_qty = ?12, updated_at = ?13 \
             WHERE item_no = ?1",
        )
        .bind(item_no)
        .bind(&input.item_name)
        .bind(&input.brand)
        .bind(&input.item_type)
        .bind(&input.location)
        .bind(&input.unit_of_measure)
        .bind(&input.supplier)
        .bind(&input.last_po)
        .bind(input.price_per_unit_cents)
        .bind(input.min_stock)
        .bind(next.in_qty)
        .bind(next.out_qty)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        let updated = Self::load(&mut tx, item_no).await?;
        tx.commit().await?;

        info!(item_no, "Item updated");
        Ok(updated.into())
    }

    /// Sets the balance directly (stock-set).
    ///
    /// `out_qty` is kept; `in_qty` is back-derived so the pair stays
    /// consistent. Negative balances are rejected by the engine.
    pub async fn set_stock(&self, item_no: i64, balance: i64) -> LedgerResult<Item> {
        debug!(item_no, balance, "Setting stock level");
        self.apply(item_no, StockUpdate::SetBalance(balance)).await
    }

    /// Records a stock receipt (stock-insert). `quantity` must be positive.
    pub async fn insert_stock(&self, item_no: i64, quantity: i64) -> LedgerResult<Item> {
        debug!(item_no, quantity, "Inserting stock");
        self.apply(item_no, StockUpdate::Receive(quantity)).await
    }

    /// Records a stock issue (stock-out).
    ///
    /// Fails with `InsufficientStock` - carrying available vs. requested -
    /// when the balance cannot cover the quantity; the item is left
    /// unchanged.
    pub async fn stock_out(&self, item_no: i64, quantity: i64) -> LedgerResult<Item> {
        debug!(item_no, quantity, "Issuing stock");
        self.apply(item_no, StockUpdate::Issue(quantity)).await
    }

    /// Overrides quantities explicitly (quantity-override).
    ///
    /// `update_type` selects the sub-intent; when unspecified the supplied
    /// subset of fields is applied directly. At least one quantity field is
    /// required. Any combination whose resulting balance would be negative
    /// is rejected.
    pub async fn set_quantities(&self, item_no: i64, update: QuantityUpdate) -> LedgerResult<Item> {
        let intent = match update.update_type {
            Some(UpdateType::SetBalance) => {
                let balance = update
                    .balance
                    .ok_or_else(|| ValidationError::required("balance"))?;
                StockUpdate::SetBalance(balance)
            }
            Some(UpdateType::AdjustIn) => {
                let in_qty = update
                    .in_qty
                    .ok_or_else(|| ValidationError::required("in_qty"))?;
                StockUpdate::SetInQty(in_qty)
            }
            Some(UpdateType::AdjustOut) => {
                let out_qty = update
                    .out_qty
                    .ok_or_else(|| ValidationError::required("out_qty"))?;
                StockUpdate::SetOutQty(out_qty)
            }
            None => {
                if update.in_qty.is_none() && update.out_qty.is_none() && update.balance.is_none()
                {
                    return Err(ValidationError::required("in_qty, out_qty or balance").into());
                }
                StockUpdate::Direct {
                    in_qty: update.in_qty,
                    out_qty: update.out_qty,
                    balance: update.balance,
                }
            }
        };

        debug!(item_no, ?intent, "Overriding quantities");
        self.apply(item_no, intent).await
    }

    // -------------------------------------------------------------------------
    // Delete
    // -------------------------------------------------------------------------

    /// Deletes an item unconditionally and returns the pre-delete snapshot.
    ///
    /// No soft-delete and no referential check: the checkout batch is
    /// transient, so nothing references a ledger row.
    pub async fn delete(&self, item_no: i64) -> LedgerResult<Item> {
        debug!(item_no, "Deleting item");

        let mut tx = self.pool.begin().await?;
        let row = Self::load(&mut tx, item_no).await?;

        sqlx::query("DELETE FROM items WHERE item_no = ?1")
            .bind(item_no)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        tx.commit().await?;

        info!(item_no, "Item deleted");
        Ok(row.into())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Runs one reconcile-and-persist cycle inside a transaction and returns
    /// the re-read item.
    async fn apply(&self, item_no: i64, intent: StockUpdate) -> LedgerResult<Item> {
        let mut tx = self.pool.begin().await?;

        let row = Self::load(&mut tx, item_no).await?;
        let next = reconcile(item_no, row.quantities(), intent)?;
        Self::write_quantities(&mut tx, item_no, next).await?;

        let updated = Self::load(&mut tx, item_no).await?;
        tx.commit().await?;

        Ok(updated.into())
    }

    /// Loads a row inside the caller's transaction, failing `ItemNotFound`.
    ///
    /// `pub(crate)` so the checkout repository stages the same load inside
    /// its own batch transaction.
    pub(crate) async fn load(conn: &mut SqliteConnection, item_no: i64) -> LedgerResult<ItemRow> {
        let sql = format!("{SELECT_ITEM} WHERE item_no = ?1");
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(item_no)
            .fetch_optional(&mut *conn)
            .await
            .map_err(DbError::from)?;

        row.ok_or_else(|| CoreError::ItemNotFound(item_no).into())
    }

    /// Persists a reconciled quantity pair.
    pub(crate) async fn write_quantities(
        conn: &mut SqliteConnection,
        item_no: i64,
        next: Quantities,
    ) -> LedgerResult<()> {
        let now = Utc::now();
        let result =
            sqlx::query("UPDATE items SET in_qty = ?2, out_qty = ?3, updated_at = ?4 WHERE item_no = ?1")
                .bind(item_no)
                .bind(next.in_qty)
                .bind(next.out_qty)
                .bind(now)
                .execute(&mut *conn)
                .await
                .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", item_no.to_string()).into());
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::pool::{Database, DbConfig};
    use stockpile_core::ItemStatus;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn input(name: &str, balance: i64) -> ItemInput {
        ItemInput {
            item_name: name.to_string(),
            balance,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_sets_quantity_pair() {
        let db = test_db().await;
        let item = db.items().create(input("M6 Hex Bolt", 20)).await.unwrap();

        assert_eq!(item.in_qty, 20);
        assert_eq!(item.out_qty, 0);
        assert_eq!(item.balance(), 20);
        assert!(item.item_no >= 1);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let db = test_db().await;
        let err = db.items().create(input("  ", 5)).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert_eq!(db.items().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let db = test_db().await;
        let item = db.items().create(input("Packing Tape", 0)).await.unwrap();

        assert_eq!(item.brand, "");
        assert_eq!(item.supplier, "");
        assert_eq!(item.min_stock, 0);
        assert_eq!(item.status(), ItemStatus::OutOfStock);
    }

    #[tokio::test]
    async fn test_insert_stock_accumulates() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.create(input("Label Roll", 20)).await.unwrap();
        repo.stock_out(item.item_no, 5).await.unwrap();

        let item = repo.insert_stock(item.item_no, 10).await.unwrap();
        assert_eq!(item.in_qty, 30);
        assert_eq!(item.out_qty, 5);
        assert_eq!(item.balance(), 25);
    }

    #[tokio::test]
    async fn test_insert_stock_rejects_non_positive() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.create(input("Label Roll", 20)).await.unwrap();

        for quantity in [0, -4] {
            let err = repo.insert_stock(item.item_no, quantity).await.unwrap_err();
            assert!(matches!(
                err,
                LedgerError::Core(CoreError::InvalidQuantity { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_stock_out_decrements() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.create(input("Cable Tie", 50)).await.unwrap();

        let item = repo.stock_out(item.item_no, 12).await.unwrap();
        assert_eq!(item.in_qty, 50);
        assert_eq!(item.out_qty, 12);
        assert_eq!(item.balance(), 38);
    }

    #[tokio::test]
    async fn test_stock_out_insufficient_leaves_item_unchanged() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.create(input("Cable Tie", 10)).await.unwrap();

        let err = repo.stock_out(item.item_no, 11).await.unwrap_err();
        match err {
            LedgerError::Core(CoreError::InsufficientStock {
                item_no,
                available,
                requested,
            }) => {
                assert_eq!(item_no, item.item_no);
                assert_eq!(available, 10);
                assert_eq!(requested, 11);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        let unchanged = repo.get(item.item_no).await.unwrap().unwrap();
        assert_eq!(unchanged.in_qty, 10);
        assert_eq!(unchanged.out_qty, 0);
    }

    #[tokio::test]
    async fn test_stock_out_missing_item() {
        let db = test_db().await;
        let err = db.items().stock_out(999, 1).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::ItemNotFound(999))
        ));
    }

    #[tokio::test]
    async fn test_set_stock_preserves_issue_history() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.create(input("Solder Wire", 30)).await.unwrap();
        repo.stock_out(item.item_no, 10).await.unwrap();

        let item = repo.set_stock(item.item_no, 8).await.unwrap();
        assert_eq!(item.out_qty, 10);
        assert_eq!(item.in_qty, 18);
        assert_eq!(item.balance(), 8);
    }

    #[tokio::test]
    async fn test_update_replaces_descriptive_and_keeps_out_qty() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.create(input("Flux Pen", 25)).await.unwrap();
        repo.stock_out(item.item_no, 7).await.unwrap();

        let replacement = ItemInput {
            item_name: "Flux Pen 10ml".to_string(),
            brand: "Kester".to_string(),
            location: "Shelf B-2".to_string(),
            min_stock: 5,
            balance: 12,
            ..Default::default()
        };
        let updated = repo.update(item.item_no, replacement).await.unwrap();

        assert_eq!(updated.item_name, "Flux Pen 10ml");
        assert_eq!(updated.brand, "Kester");
        assert_eq!(updated.out_qty, 7);
        assert_eq!(updated.in_qty, 19);
        assert_eq!(updated.balance(), 12);
    }

    #[tokio::test]
    async fn test_set_quantities_adjust_paths() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.create(input("Heat Shrink", 20)).await.unwrap();
        repo.stock_out(item.item_no, 5).await.unwrap();

        // adjust_in
        let updated = repo
            .set_quantities(
                item.item_no,
                QuantityUpdate {
                    update_type: Some(UpdateType::AdjustIn),
                    in_qty: Some(40),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.in_qty, 40);
        assert_eq!(updated.balance(), 35);

        // adjust_out
        let updated = repo
            .set_quantities(
                item.item_no,
                QuantityUpdate {
                    update_type: Some(UpdateType::AdjustOut),
                    out_qty: Some(40),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.out_qty, 40);
        assert_eq!(updated.balance(), 0);
    }

    #[tokio::test]
    async fn test_set_quantities_direct_balance_wins() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.create(input("Zip Ties", 20)).await.unwrap();
        repo.stock_out(item.item_no, 5).await.unwrap();

        let updated = repo
            .set_quantities(
                item.item_no,
                QuantityUpdate {
                    update_type: None,
                    in_qty: Some(100),
                    out_qty: None,
                    balance: Some(7),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.out_qty, 5);
        assert_eq!(updated.in_qty, 12);
        assert_eq!(updated.balance(), 7);
    }

    #[tokio::test]
    async fn test_set_quantities_requires_a_field() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.create(input("Epoxy", 5)).await.unwrap();

        let err = repo
            .set_quantities(item.item_no, QuantityUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));

        // flagged sub-intent without its field
        let err = repo
            .set_quantities(
                item.item_no,
                QuantityUpdate {
                    update_type: Some(UpdateType::SetBalance),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));
    }

    #[tokio::test]
    async fn test_set_quantities_rejects_negative_balance() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.create(input("Epoxy", 5)).await.unwrap();
        repo.stock_out(item.item_no, 2).await.unwrap();

        let err = repo
            .set_quantities(
                item.item_no,
                QuantityUpdate {
                    update_type: None,
                    in_qty: Some(1),
                    out_qty: None,
                    balance: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::InvalidQuantity { .. })
        ));

        let unchanged = repo.get(item.item_no).await.unwrap().unwrap();
        assert_eq!(unchanged.in_qty, 5);
        assert_eq!(unchanged.out_qty, 2);
    }

    #[tokio::test]
    async fn test_delete_returns_snapshot() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.create(input("Sandpaper", 9)).await.unwrap();

        let snapshot = repo.delete(item.item_no).await.unwrap();
        assert_eq!(snapshot.item_name, "Sandpaper");
        assert_eq!(snapshot.balance(), 9);

        assert!(repo.get(item.item_no).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_not_found() {
        let db = test_db().await;
        let err = db.items().delete(424242).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::ItemNotFound(424242))
        ));
        assert_eq!(db.items().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_item_no_not_reused_after_delete() {
        let db = test_db().await;
        let repo = db.items();
        let first = repo.create(input("A", 1)).await.unwrap();
        repo.delete(first.item_no).await.unwrap();

        let second = repo.create(input("B", 1)).await.unwrap();
        assert!(second.item_no > first.item_no);
    }

    #[tokio::test]
    async fn test_bulk_create_partial_failure() {
        let db = test_db().await;
        let rows = vec![
            input("Row One", 5),
            input("", 3), // missing item_name
            input("Row Three", 7),
        ];

        let report = db.items().bulk_create(rows).await;

        assert_eq!(report.summary.attempted, 3);
        assert_eq!(report.summary.successful, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.created.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert_eq!(report.failures[0].original.balance, 3);
        assert!(report.failures[0].error.contains("item_name"));

        // earlier successes stay inserted
        assert_eq!(db.items().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_search_and_list() {
        let db = test_db().await;
        let repo = db.items();
        repo.create(ItemInput {
            item_name: "M6 Hex Bolt".to_string(),
            brand: "Fastenal".to_string(),
            balance: 10,
            ..Default::default()
        })
        .await
        .unwrap();
        repo.create(input("Wood Screw", 10)).await.unwrap();

        let hits = repo.search("hex", 20).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item_name, "M6 Hex Bolt");

        let by_brand = repo.search("fastenal", 20).await.unwrap();
        assert_eq!(by_brand.len(), 1);

        let all = repo.search("", 20).await.unwrap();
        assert_eq!(all.len(), 2);
        // sorted by name
        assert_eq!(all[0].item_name, "M6 Hex Bolt");
    }

    #[tokio::test]
    async fn test_reread_is_consistent_after_mutation() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.create(input("Rivets", 40)).await.unwrap();

        let returned = repo.stock_out(item.item_no, 15).await.unwrap();
        let reread = repo.get(item.item_no).await.unwrap().unwrap();

        assert_eq!(returned.in_qty, reread.in_qty);
        assert_eq!(returned.out_qty, reread.out_qty);
        assert_eq!(returned.balance(), reread.balance());
        assert_eq!(returned.status(), reread.status());
    }
}
