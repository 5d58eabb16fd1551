//! API handlers for the HTTP REST API

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::{self, filter, CostModel, DashboardView};
use crate::error::Error;
use crate::models::{
    CampaignType, DailyCost, DateRange, EventRecord, FilterState, GroupCost, KpiSummary,
    RollupRow, Selection,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded event set; never mutated after startup
    pub events: Arc<Vec<EventRecord>>,
    /// Pricing applied to every view
    pub cost: Arc<CostModel>,
}

/// Error body returned to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(err: &Error) -> ApiError {
    let status = if err.is_input_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Filter query parameters; `all` or absence disables a dimension
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// Campaign id
    pub campaign: Option<String>,
    /// `automation` or `campaign`, case-insensitive
    pub campaign_type: Option<String>,
    /// Group label; `Unknown` selects events without one
    pub group: Option<String>,
    /// Inclusive start day, `YYYY-MM-DD`
    pub from: Option<String>,
    /// Inclusive end day, `YYYY-MM-DD`
    pub to: Option<String>,
}

impl FilterQuery {
    /// Build the immutable filter snapshot for this request
    pub fn to_filter(&self) -> crate::error::Result<FilterState> {
        let from = parse_day("from", self.from.as_deref())?;
        let to = parse_day("to", self.to.as_deref())?;

        Ok(FilterState {
            campaign: Selection::<String>::from_param(self.campaign.as_deref()),
            campaign_type: Selection::<CampaignType>::from_param(self.campaign_type.as_deref())?,
            group: Selection::<String>::from_param(self.group.as_deref()),
            date_range: DateRange::new(from, to)?,
        })
    }
}

fn parse_day(name: &str, value: Option<&str>) -> crate::error::Result<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| Error::validation(format!("{name} must be YYYY-MM-DD, got {v:?}"))),
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `ok`
    pub status: String,
    /// Crate version
    pub version: String,
    /// Size of the loaded event set
    pub events: usize,
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        events: state.events.len(),
    })
}

/// Values available to the filter pickers
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogResponse {
    /// Distinct campaign ids, sorted
    pub campaigns: Vec<String>,
    /// Distinct group labels, sorted
    pub groups: Vec<String>,
}

/// List distinct campaigns and groups
pub async fn list_campaigns(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        campaigns: engine::campaign_ids(&state.events),
        groups: engine::group_labels(&state.events),
    })
}

/// Scalar KPIs
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<KpiSummary>, ApiError> {
    let filter_state = query.to_filter().map_err(|e| api_error(&e))?;
    let filtered = filter::apply(&state.events, &filter_state);
    Ok(Json(engine::summarize(filtered.iter().copied(), &state.cost)))
}

/// Cost per day
pub async fn get_daily(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<DailyCost>>, ApiError> {
    let filter_state = query.to_filter().map_err(|e| api_error(&e))?;
    let filtered = filter::apply(&state.events, &filter_state);
    Ok(Json(engine::by_day(filtered.iter().copied(), &state.cost)))
}

/// Cost per group
pub async fn get_groups(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<GroupCost>>, ApiError> {
    let filter_state = query.to_filter().map_err(|e| api_error(&e))?;
    let filtered = filter::apply(&state.events, &filter_state);
    Ok(Json(engine::by_group(filtered.iter().copied(), &state.cost)))
}

/// Cost per group and campaign
pub async fn get_rollup(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<RollupRow>>, ApiError> {
    let filter_state = query.to_filter().map_err(|e| api_error(&e))?;
    let filtered = filter::apply(&state.events, &filter_state);
    Ok(Json(engine::by_group_and_campaign(
        filtered.iter().copied(),
        &state.cost,
    )))
}

/// Every view at once
pub async fn get_overview(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<DashboardView>, ApiError> {
    let filter_state = query.to_filter().map_err(|e| api_error(&e))?;
    Ok(Json(DashboardView::compute(
        &state.events,
        &filter_state,
        &state.cost,
    )))
}
