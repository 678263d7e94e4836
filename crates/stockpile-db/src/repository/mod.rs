//! # Repository Module
//!
//! Database repository implementations for Stockpile.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Shell boundary                                                        │
//! │       │                                                                 │
//! │       │  db.items().stock_out(42, 5)                                   │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ItemRepository                                                        │
//! │  ├── create(&self, input)                                              │
//! │  ├── stock_out(&self, item_no, quantity)                               │
//! │  ├── set_quantities(&self, item_no, update)                            │
//! │  └── delete(&self, item_no)                                            │
//! │       │                                                                 │
//! │       │  load → reconcile → persist, one transaction                    │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place - nothing above this layer builds      │
//! │    query text                                                           │
//! │  • Easy to test against an in-memory database                          │
//! │  • The reconciliation engine stays pure and synchronous                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Item CRUD, stock mutations, bulk create
//! - [`checkout::CheckoutRepository`] - Atomic multi-item checkout batches

pub mod checkout;
pub mod item;
