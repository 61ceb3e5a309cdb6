//! Class-level analytics endpoints.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::ApiState;
use crate::classifier::{ClassStatisticsMap, CostEstimate};
use crate::error::AppError;

/// Body returned by `/distribution` when readings exist but none is active.
pub const NO_ACTIVE_DATA_MESSAGE: &str = "Tidak ada data aktif";

#[derive(Debug, Deserialize)]
pub struct CostQuery {
    pub kwh_price: Option<f64>,
}

pub async fn statistics(
    State(queries): State<ApiState>,
) -> Result<Json<ClassStatisticsMap>, AppError> {
    Ok(Json(queries.statistics().await?))
}

pub async fn distribution(State(queries): State<ApiState>) -> Result<Response, AppError> {
    let response = match queries.distribution().await? {
        Some(distribution) => Json(distribution).into_response(),
        None => Json(json!({ "message": NO_ACTIVE_DATA_MESSAGE })).into_response(),
    };
    Ok(response)
}

/// `GET /cost_estimate?kwh_price=R`, falling back to the configured rate.
pub async fn cost_estimate(
    State(queries): State<ApiState>,
    params: Result<Query<CostQuery>, QueryRejection>,
) -> Result<Json<CostEstimate>, AppError> {
    let Query(params) = params?;
    Ok(Json(queries.cost_estimate(params.kwh_price).await?))
}
