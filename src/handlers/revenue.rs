use crate::{
    models::{RevenueCompareQuery, RevenueData, RevenueTrendQuery},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use tracing::warn;

/// Revenue trend series; zeroed when the revenue service is unavailable
#[utoipa::path(
    get,
    path = "/api/v1/revenue/trend",
    params(RevenueTrendQuery),
    responses(
        (status = 200, description = "Revenue total, trend and chart series", body = RevenueData),
    ),
    tag = "Revenue"
)]
pub async fn get_revenue_trend(
    State(state): State<AppState>,
    Query(query): Query<RevenueTrendQuery>,
) -> Json<RevenueData> {
    let period = query.period.unwrap_or_default();
    match state.api.revenue_trend(period).await {
        Ok(reply) => Json(RevenueData::from_trend(reply)),
        Err(e) => {
            warn!("Revenue trend for {} unavailable: {}", period.as_param(), e);
            Json(RevenueData::empty())
        }
    }
}

/// Current period revenue against the previous one
#[utoipa::path(
    get,
    path = "/api/v1/revenue/compare",
    params(RevenueCompareQuery),
    responses(
        (status = 200, description = "Two-point comparison", body = RevenueData),
    ),
    tag = "Revenue"
)]
pub async fn get_revenue_comparison(
    State(state): State<AppState>,
    Query(query): Query<RevenueCompareQuery>,
) -> Json<RevenueData> {
    let period_type = query.period_type.unwrap_or_default();
    match state.api.revenue_comparison(period_type).await {
        Ok(reply) => Json(RevenueData::from_comparison(&reply, period_type)),
        Err(e) => {
            warn!("Revenue comparison ({}) unavailable: {}", period_type.as_param(), e);
            Json(RevenueData::empty())
        }
    }
}
