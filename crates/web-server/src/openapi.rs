//! OpenAPI documentation for the ShopEase API.
//!
//! The document is derived from the `#[utoipa::path]` annotations on the
//! handlers and served interactively through Swagger UI.

use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{error, handlers, AppState};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShopEase API Documentation",
        description = "API documentation for ShopEase e-commerce platform"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Orders", description = "Order lookups and updates"),
        (name = "Products", description = "Per-product sales aggregates")
    ),
    paths(
        handlers::health,
        handlers::get_order_total_sales,
        handlers::get_order,
        handlers::update_order,
        handlers::get_order_summary,
        handlers::get_product_total_sales,
        handlers::list_product_orders,
    ),
    components(
        schemas(
            database::Order,
            database::OrderSummary,
            handlers::TotalSalesResponse,
            handlers::UpdateOrderRequest,
            error::MessageBody,
            error::ErrorBody,
        )
    )
)]
pub struct ApiDoc;

/// Create the documentation routes.
///
/// Adds the following routes:
/// - `/openapi.json` - OpenAPI document (used by Swagger UI)
/// - `/api-docs` - Swagger UI interactive documentation
pub fn swagger_routes() -> Router<Arc<AppState>> {
    Router::new().merge(SwaggerUi::new("/api-docs").url("/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_is_valid() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&doc).expect("Failed to serialize OpenAPI document");
        assert!(json.contains("ShopEase API Documentation"));
        assert!(json.contains("/api/orders/total_sales/{id}"));
        assert!(json.contains("/api/products/{id}/orders"));
    }

    #[test]
    fn openapi_has_all_tags() {
        let doc = ApiDoc::openapi();
        let tags: Vec<&str> = doc
            .tags
            .as_ref()
            .map(|t| t.iter().map(|tag| tag.name.as_str()).collect())
            .unwrap_or_default();

        assert!(tags.contains(&"Health"));
        assert!(tags.contains(&"Orders"));
        assert!(tags.contains(&"Products"));
    }

    #[test]
    fn openapi_documents_both_error_shapes() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("Missing components");

        assert!(components.schemas.contains_key("MessageBody"));
        assert!(components.schemas.contains_key("ErrorBody"));
    }
}
