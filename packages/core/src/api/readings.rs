//! Reading-level endpoints: recent classified rows, latest status,
//! whole-set summary and the trend window.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use super::ApiState;
use crate::classifier::{ClassifiedReading, ReadingSummary};
use crate::error::AppError;
use crate::queries::{LatestStatus, Trend, DEFAULT_CLASSIFY_LIMIT, DEFAULT_TREND_LIMIT};

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// `GET /classify?limit=N`
pub async fn classify(
    State(queries): State<ApiState>,
    params: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<Vec<ClassifiedReading>>, AppError> {
    let Query(params) = params?;
    let limit = params.limit.unwrap_or(DEFAULT_CLASSIFY_LIMIT);
    Ok(Json(queries.classified(limit).await?))
}

/// `GET /status`
pub async fn status(State(queries): State<ApiState>) -> Result<Json<LatestStatus>, AppError> {
    Ok(Json(queries.latest_status().await?))
}

/// `GET /summary`
pub async fn summary(State(queries): State<ApiState>) -> Result<Json<ReadingSummary>, AppError> {
    Ok(Json(queries.summary().await?))
}

/// `GET /trend?limit=N`
pub async fn trend(
    State(queries): State<ApiState>,
    params: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<Trend>, AppError> {
    let Query(params) = params?;
    let limit = params.limit.unwrap_or(DEFAULT_TREND_LIMIT);
    Ok(Json(queries.trend(limit).await?))
}
