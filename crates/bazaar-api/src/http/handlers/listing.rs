//! Listing ledger handlers: list, query, settle and inventory.

use axum::Json;
use axum::extract::State;

use bazaar_types::listing::{CreateListingRequest, Listing};

use crate::http::error::AppError;
use crate::http::extractors::query::{BazaarQuery, BuyerQuery, ItemQuery, SettleQuery};
use crate::state::AppState;

/// GET /list?item=&price=&seller=
pub async fn create_listing(
    State(state): State<AppState>,
    BazaarQuery(request): BazaarQuery<CreateListingRequest>,
) -> Result<&'static str, AppError> {
    state.ledger.create(request).await?;
    Ok("listed")
}

/// GET /available?item=
pub async fn available(
    State(state): State<AppState>,
    BazaarQuery(query): BazaarQuery<ItemQuery>,
) -> Result<Json<Vec<Listing>>, AppError> {
    Ok(Json(state.ledger.available(query.item).await?))
}

/// GET /sold?item=&buyer=
pub async fn settle(
    State(state): State<AppState>,
    BazaarQuery(query): BazaarQuery<SettleQuery>,
) -> Result<&'static str, AppError> {
    state.ledger.settle(query.item, query.buyer).await?;
    Ok("sold")
}

/// GET /inventory?buyer=
pub async fn inventory(
    State(state): State<AppState>,
    BazaarQuery(query): BazaarQuery<BuyerQuery>,
) -> Result<Json<Vec<Listing>>, AppError> {
    Ok(Json(state.ledger.inventory(query.buyer).await?))
}
