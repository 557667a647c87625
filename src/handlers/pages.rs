//! Dashboard page handler (HTML)

use axum::{extract::{Query, State}, response::Html};
use serde::Deserialize;

use super::TableQuery;
use crate::{AppState, AppResult, AppError};
use crate::constants::MAX_DISPLAY_FEATURES;
use crate::views::{self, pages, Page};

#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Render one view of the dashboard. Each interaction is a fresh GET.
pub async fn render(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    Query(table): Query<TableQuery>,
) -> AppResult<Html<String>> {
    let page = match query.page.as_deref() {
        None | Some("") => Page::ExecutiveSummary,
        Some(slug) => Page::from_slug(slug)
            .ok_or_else(|| AppError::NotFound(format!("Unknown page '{}'", slug)))?,
    };

    tracing::debug!("Rendering {}", page.slug());

    let dataset = &state.artifacts.dataset;
    let body = match page {
        Page::ExecutiveSummary => pages::executive_summary(&dataset.summary()),
        Page::KeyDriverAnalysis => pages::key_driver_analysis(
            &dataset.churn_rate_by_contract(),
            &dataset.churn_rate_by_internet_service(),
        ),
        Page::ModelInterpretation => {
            let bundle = &state.artifacts.attribution;
            pages::model_interpretation(&bundle.explainer, &bundle.feature_impacts(MAX_DISPLAY_FEATURES))
        }
        Page::ActionableInsights => {
            let bounds = state.config.top_n;
            let top_n = table.top_n(&bounds)?;
            let sort = table.sort()?;
            let customers = dataset.select_top_risk(top_n, &bounds, sort)?;
            pages::actionable_insights(&customers, top_n, &bounds, sort)
        }
    };

    Ok(Html(views::layout(page, &body)))
}
