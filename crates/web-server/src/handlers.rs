use crate::error::{AppError, ErrorBody, MessageBody};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use database::{Order, OrderSummary};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// The revenue figure returned by the aggregation routes.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"total_sales": 199.9}))]
pub struct TotalSalesResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_sales: Decimal,
}

/// The body of an order update. Both fields are required; they are optional
/// here only so their absence reaches the validation logic instead of being
/// rejected as a deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({"unitssold": 10, "unitprice": 49.99}))]
pub struct UpdateOrderRequest {
    /// New number of units sold. Must not be negative.
    pub unitssold: Option<i32>,
    /// New unit price. Must not be negative.
    #[schema(value_type = Option<f64>)]
    pub unitprice: Option<Decimal>,
}

/// # GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = String)
    )
)]
pub async fn health() -> &'static str {
    "OK"
}

/// # GET /api/orders/total_sales/:id
/// Computes the revenue of a single order.
#[utoipa::path(
    get,
    path = "/api/orders/total_sales/{id}",
    tag = "Orders",
    params(
        ("id" = i64, Path, description = "ID of the order")
    ),
    responses(
        (status = 200, description = "Revenue of the order", body = TotalSalesResponse),
        (status = 404, description = "Order not found", body = MessageBody),
        (status = 500, description = "Server error", body = MessageBody)
    )
)]
pub async fn get_order_total_sales(
    Path(order_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<TotalSalesResponse>, AppError> {
    let total_sales = state
        .db_repo
        .get_order_total_sales(order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
    Ok(Json(TotalSalesResponse { total_sales }))
}

/// # GET /api/orders/:id
/// Fetches a complete order row, including its `last_updated` timestamp.
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(
        ("id" = i64, Path, description = "ID of the order")
    ),
    responses(
        (status = 200, description = "The requested order", body = Order),
        (status = 404, description = "Order not found", body = MessageBody),
        (status = 500, description = "Server error", body = MessageBody)
    )
)]
pub async fn get_order(
    Path(order_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .db_repo
        .get_order(order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
    Ok(Json(order))
}

/// # GET /api/orders/orders/:id
/// The older order lookup. Serves the five-column projection and reports a
/// missing order under the `error` key rather than `message`.
#[utoipa::path(
    get,
    path = "/api/orders/orders/{id}",
    tag = "Orders",
    params(
        ("id" = i64, Path, description = "ID of the order")
    ),
    responses(
        (status = 200, description = "The requested order, without bookkeeping columns", body = OrderSummary),
        (status = 404, description = "Order not found", body = ErrorBody),
        (status = 500, description = "Server error", body = MessageBody)
    )
)]
pub async fn get_order_summary(
    Path(order_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<OrderSummary>, AppError> {
    let order = state
        .db_repo
        .get_order_summary(order_id)
        .await?
        .ok_or_else(|| AppError::NotFoundLegacy("Order not found".to_string()))?;
    Ok(Json(order))
}

/// # PUT /api/orders/:id
/// Overwrites the sales figures of one order.
///
/// The id arrives as a raw string so its validation failure is reported in
/// the same `{"error": ...}` shape as the body validations, in a fixed
/// order: id, then unitssold, then unitprice.
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(
        ("id" = i64, Path, description = "ID of the order to update")
    ),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated successfully", body = MessageBody),
        (status = 400, description = "Invalid id or field value", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
        (status = 500, description = "Server error", body = MessageBody)
    )
)]
pub async fn update_order(
    Path(order_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<MessageBody>, AppError> {
    let order_id: i64 = match order_id.parse() {
        Ok(id) if id > 0 => id,
        _ => return Err(AppError::Validation("Invalid order ID".to_string())),
    };

    let unitssold = match payload.unitssold {
        Some(units) if units >= 0 => units,
        _ => return Err(AppError::Validation("Invalid unitssold value".to_string())),
    };

    let unitprice = match payload.unitprice {
        Some(price) if price >= Decimal::ZERO => price,
        _ => return Err(AppError::Validation("Invalid unitprice value".to_string())),
    };

    let rows_affected = state
        .db_repo
        .update_order_sales(order_id, unitssold, unitprice)
        .await?;
    if rows_affected == 0 {
        return Err(AppError::NotFoundLegacy("Order not found".to_string()));
    }

    Ok(Json(MessageBody {
        message: "Order updated successfully".to_string(),
    }))
}

/// # GET /api/products/:id/total_sales
/// Sums the revenue of every order for one product. A product with no
/// orders yields zero rather than a 404; the id is never checked against
/// a catalog.
#[utoipa::path(
    get,
    path = "/api/products/{id}/total_sales",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "ID of the product")
    ),
    responses(
        (status = 200, description = "Summed revenue across the product's orders", body = TotalSalesResponse),
        (status = 500, description = "Server error", body = MessageBody)
    )
)]
pub async fn get_product_total_sales(
    Path(product_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<TotalSalesResponse>, AppError> {
    let total_sales = state.db_repo.get_product_total_sales(product_id).await?;
    Ok(Json(TotalSalesResponse { total_sales }))
}

/// # GET /api/products/:id/orders
/// Lists every order recorded for one product. An unknown product simply
/// yields an empty list.
#[utoipa::path(
    get,
    path = "/api/products/{id}/orders",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "ID of the product")
    ),
    responses(
        (status = 200, description = "Orders recorded for the product", body = Vec<OrderSummary>),
        (status = 500, description = "Server error", body = MessageBody)
    )
)]
pub async fn list_product_orders(
    Path(product_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderSummary>>, AppError> {
    let orders = state.db_repo.get_orders_for_product(product_id).await?;
    Ok(Json(orders))
}
