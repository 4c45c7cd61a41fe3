//! Sales HTTP Routes
//!
//! Records listing, filter options and summary endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::errors::DashboardError;
use crate::query::{SalesQuery, SummaryCriteria};
use crate::service::{Dashboard, FilterOptions, SalesPage, SalesSummary};

/// Query-string pairs in request order; keys may repeat
type QueryPairs = Vec<(String, String)>;

/// Create sales routes
pub fn sales_routes(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(list_records))
        .route("/filters/options", get(filter_options))
        .route("/summary", get(summary))
        .with_state(dashboard)
}

/// List records with search, filters, sorting and pagination
async fn list_records(
    State(dashboard): State<Arc<Dashboard>>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<SalesPage>, DashboardError> {
    let query = SalesQuery::from_pairs(&pairs)?;
    let page = dashboard.records(&query)?;
    Ok(Json(page))
}

/// Distinct values for every filter control
async fn filter_options(
    State(dashboard): State<Arc<Dashboard>>,
) -> Result<Json<FilterOptions>, DashboardError> {
    Ok(Json(dashboard.filter_options()?))
}

/// Summary statistics for a region/category selection
async fn summary(
    State(dashboard): State<Arc<Dashboard>>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<SalesSummary>, DashboardError> {
    let criteria = SummaryCriteria::from_pairs(&pairs);
    Ok(Json(dashboard.summary(&criteria)?))
}
