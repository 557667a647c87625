//! Report data handlers (JSON)

use axum::{extract::{Query, State}, Json};
use serde::Serialize;

use super::TableQuery;
use crate::{AppState, AppResult};
use crate::constants::MAX_DISPLAY_FEATURES;
use crate::models::{
    CategoryRate, ExplainerInfo, FeatureImpact, HighRiskCustomer, SummaryMetrics, TableSort,
};

#[derive(Debug, Serialize)]
pub struct InterpretationReport {
    pub explainer: ExplainerInfo,
    pub features: Vec<FeatureImpact>,
}

#[derive(Debug, Serialize)]
pub struct HighRiskReport {
    pub top_n: i64,
    pub sort: TableSort,
    pub customers: Vec<HighRiskCustomer>,
}

/// Headline KPIs
pub async fn summary(State(state): State<AppState>) -> Json<SummaryMetrics> {
    Json(state.artifacts.dataset.summary())
}

/// Churn rate per contract term
pub async fn contract_drivers(State(state): State<AppState>) -> Json<Vec<CategoryRate>> {
    Json(state.artifacts.dataset.churn_rate_by_contract())
}

/// Churn rate per internet service
pub async fn internet_service_drivers(State(state): State<AppState>) -> Json<Vec<CategoryRate>> {
    Json(state.artifacts.dataset.churn_rate_by_internet_service())
}

/// Top features by attribution magnitude
pub async fn interpretation(State(state): State<AppState>) -> Json<InterpretationReport> {
    let bundle = &state.artifacts.attribution;
    Json(InterpretationReport {
        explainer: bundle.explainer.clone(),
        features: bundle.feature_impacts(MAX_DISPLAY_FEATURES),
    })
}

/// Highest-probability customers
pub async fn high_risk(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> AppResult<Json<HighRiskReport>> {
    let bounds = state.config.top_n;
    let top_n = query.top_n(&bounds)?;
    let sort = query.sort()?;
    let customers = state.artifacts.dataset.select_top_risk(top_n, &bounds, sort)?;

    Ok(Json(HighRiskReport { top_n, sort, customers }))
}
