//! # stockpile-db: Database Layer for Stockpile
//!
//! This crate provides database access for the Stockpile inventory system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockpile Data Flow                               │
//! │                                                                         │
//! │  Shell boundary (stock_out request)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockpile-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (item.rs,    │    │  (embedded)  │  │   │
//! │  │   │               │    │   checkout.rs)│    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ItemRepo      │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │ CheckoutRepo  │    │ ...          │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  │        every mutation: BEGIN → load → reconcile() → UPDATE    │   │
//! │  │        → re-read → COMMIT   (reconcile() is stockpile-core)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │          ~/.local/share/stockpile/stockpile.db                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database, operation and wire error types
//! - [`repository`] - Repository implementations (item, checkout)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockpile_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/stockpile.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let created = db.items().create(input).await?;
//! let receipt = db.checkout().checkout(request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ApiError, DbError, ErrorCode, LedgerError, LedgerResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::checkout::CheckoutRepository;
pub use repository::item::ItemRepository;
