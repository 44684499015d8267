use crate::DbError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use sqlx::Row;
use utoipa::ToSchema;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// A complete row from the `orders` table.
///
/// `unitprice` is stored as NUMERIC and carried as a `Decimal`; it serializes
/// as a plain JSON number so API consumers see `19.99`, not `"19.99"`.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Order {
    #[schema(example = 1)]
    pub order_id: i64,
    #[schema(example = "2023-07-19T15:00:00Z")]
    pub order_date: DateTime<Utc>,
    #[schema(example = 1001)]
    pub product_id: i64,
    #[schema(example = 10)]
    pub unitssold: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 19.99)]
    pub unitprice: Decimal,
    #[schema(example = "2023-07-19T15:00:00Z")]
    pub last_updated: DateTime<Utc>,
}

/// The five-column projection served by the older order lookup route.
/// Unlike [`Order`], it omits the `last_updated` bookkeeping column.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct OrderSummary {
    pub order_id: i64,
    pub order_date: DateTime<Utc>,
    pub product_id: i64,
    pub unitssold: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 19.99)]
    pub unitprice: Decimal,
}

/// The generated fields of an order about to be inserted. The `order_id`
/// itself is allocated separately so callers can batch sequential ids.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_date: DateTime<Utc>,
    pub product_id: i64,
    pub unitssold: i32,
    pub unitprice: Decimal,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches a single complete order row, or `None` if the id is unknown.
    pub async fn get_order(&self, order_id: i64) -> Result<Option<Order>, DbError> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT order_id, order_date, product_id, unitssold, unitprice, last_updated FROM orders WHERE order_id = $1"
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    /// Fetches the five-column order projection used by the older lookup route.
    pub async fn get_order_summary(
        &self,
        order_id: i64,
    ) -> Result<Option<OrderSummary>, DbError> {
        let order = sqlx::query_as::<_, OrderSummary>(
            "SELECT order_id, order_date, product_id, unitssold, unitprice FROM orders WHERE order_id = $1"
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    /// Computes the revenue of a single order (`unitssold * unitprice`).
    /// Returns `None` when the order does not exist.
    pub async fn get_order_total_sales(
        &self,
        order_id: i64,
    ) -> Result<Option<Decimal>, DbError> {
        let row = sqlx::query(
            "SELECT unitssold * unitprice AS total_sales FROM orders WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.get("total_sales")))
    }

    /// Sums the revenue of every order for one product.
    ///
    /// A product with no orders yields zero, not an error; the SQL SUM of an
    /// empty set is NULL and is normalized here.
    pub async fn get_product_total_sales(&self, product_id: i64) -> Result<Decimal, DbError> {
        let row = sqlx::query(
            r#"
            SELECT SUM(unitssold * unitprice) AS total_sales
            FROM orders
            WHERE product_id = $1
            "#,
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await?;
        let total: Option<Decimal> = row.get("total_sales");
        Ok(total.unwrap_or(Decimal::ZERO))
    }

    /// Fetches every order recorded for one product, oldest id first.
    pub async fn get_orders_for_product(
        &self,
        product_id: i64,
    ) -> Result<Vec<OrderSummary>, DbError> {
        let orders = sqlx::query_as::<_, OrderSummary>(
            "SELECT order_id, order_date, product_id, unitssold, unitprice FROM orders WHERE product_id = $1 ORDER BY order_id"
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    /// Overwrites the sales figures of one order. Returns the number of rows
    /// touched so callers can distinguish a missing order (zero) from success.
    pub async fn update_order_sales(
        &self,
        order_id: i64,
        unitssold: i32,
        unitprice: Decimal,
    ) -> Result<u64, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET unitssold = $1, unitprice = $2
            WHERE order_id = $3
            "#,
        )
        .bind(unitssold)
        .bind(unitprice)
        .bind(order_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Saves a single order under an explicit id.
    /// Uses `ON CONFLICT DO NOTHING` to be idempotent, so a re-run of the
    /// seeder cannot fail on ids that already exist.
    pub async fn save_order(&self, order_id: i64, order: &NewOrder) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO orders (order_id, order_date, product_id, unitssold, unitprice)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (order_id) DO NOTHING
            "#,
        )
        .bind(order_id)
        .bind(order.order_date)
        .bind(order.product_id)
        .bind(order.unitssold)
        .bind(order.unitprice)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Returns the highest order id currently in the table, or zero for an
    /// empty table. The seeder allocates new ids starting just above this.
    pub async fn get_max_order_id(&self) -> Result<i64, DbError> {
        let row = sqlx::query("SELECT COALESCE(MAX(order_id), 0) AS max_id FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("max_id"))
    }
}
