//! # stockpile-core: Pure Ledger Logic for Stockpile
//!
//! This crate is the **heart** of Stockpile. It contains the stock ledger
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockpile Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Desktop Shell / REST Boundary                   │   │
//! │  │      (external collaborators — not part of this workspace)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockpile-db (Database Layer)                   │   │
//! │  │     ItemRepository, CheckoutRepository, pool, migrations        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stockpile-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ reconcile │  │   money   │  │ validation│  │   │
//! │  │   │   Item    │  │ StockUpdate│ │   Money   │  │   rules   │  │   │
//! │  │   │ItemStatus │  │ Quantities │ │  (cents)  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, ItemStatus, checkout and bulk payloads)
//! - [`reconcile`] - The quantity reconciliation engine
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **One Guard**: Every stock mutation, on every path, goes through
//!    [`reconcile::reconcile`] - nothing else may touch the quantity pair
//! 4. **Derived, Never Stored**: balance, cost, deficit and status are
//!    computed from `(in_qty, out_qty, min_stock, price)` at read time
//!
//! ## Example Usage
//!
//! ```rust
//! use stockpile_core::reconcile::{reconcile, Quantities, StockUpdate};
//!
//! // An item that has received 20 units and issued 5
//! let current = Quantities { in_qty: 20, out_qty: 5 };
//!
//! // Receiving 10 more moves the balance from 15 to 25
//! let next = reconcile(1, current, StockUpdate::Receive(10)).unwrap();
//! assert_eq!(next.in_qty, 30);
//! assert_eq!(next.balance(), 25);
//!
//! // Issuing more than the balance is rejected before any write
//! assert!(reconcile(1, next, StockUpdate::Issue(26)).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod reconcile;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockpile_core::Money` instead of
// `use stockpile_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use reconcile::{reconcile, Quantities, StockUpdate};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single checkout batch
///
/// ## Business Reason
/// A checkout runs as one database transaction; an unbounded batch would hold
/// the write path for its whole duration. 100 lines is far above any real
/// checkout while keeping transactions short.
pub const MAX_CHECKOUT_LINES: usize = 100;

/// Maximum length of an item name
pub const MAX_ITEM_NAME_LEN: usize = 200;
