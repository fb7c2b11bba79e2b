//! Order command and query endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::Money;
use domain::{CreateOrder, GetOrderById, GetOrderSummaries, OrderDto, OrderSummaryDto};
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub first_name: String,
    pub last_name: String,
    pub status: String,
    pub total_cost_cents: i64,
}

/// POST /orders — dispatch a CreateOrder command.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderDto>), ApiError> {
    let command = CreateOrder::new(
        req.first_name,
        req.last_name,
        req.status,
        Money::from_cents(req.total_cost_cents),
    );

    let order = state.mediator.send(command).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders/:id — look up a single order in the read model.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<OrderDto>, ApiError> {
    let order = state
        .mediator
        .query(GetOrderById::new(id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    Ok(Json(order))
}

/// GET /orders — list all order summaries.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderSummaryDto>>, ApiError> {
    let summaries = state.mediator.query(GetOrderSummaries).await?;
    Ok(Json(summaries))
}
