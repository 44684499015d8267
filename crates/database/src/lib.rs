//! # ShopEase Database Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! PostgreSQL database. It is the system's "sales ledger."
//!
//! ## Architectural Principles
//!
//! - **Adapter Layer:** This crate is an adapter that encapsulates all database-specific
//!   logic. It provides a clean, abstract API to the rest of the application, hiding
//!   the underlying SQL and database implementation details.
//! - **Plain Parameterized SQL:** All queries are parameterized strings bound at
//!   runtime, so the crate builds without a live database and every user-supplied
//!   value travels as a bind parameter, never as interpolated text.
//! - **Asynchronous & Pooled:** All operations are asynchronous, and it uses a
//!   connection pool (`PgPool`) for high-performance, concurrent database access.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations`: A utility to apply database migrations, ensuring the schema is up-to-date.
//! - `DbRepository`: The main struct that holds the connection pool and provides all
//!   the high-level data access methods (e.g., `get_order`, `update_order_sales`).
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::{DbRepository, NewOrder, Order, OrderSummary};
