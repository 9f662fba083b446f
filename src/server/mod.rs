//! HTTP layer
//!
//! An axum router serving the embedded single-page dashboard at `/` and the
//! eight payloads under `/api/*`. Query parameters use the page's own
//! vocabulary (`departamento`, `sexo`, `edad`) with `all` as the no-filter
//! sentinel. State is immutable after startup, so handlers share the
//! dashboard through a plain `Arc`.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::charts::{
    self, AgeGroupBars, CauseTable, CityBars, DepartmentBars, MonthlyTrend, PieSlices,
    SexByDepartment, SummaryStats,
};
use crate::codes::CatalogSource;
use crate::config::DashboardConfig;
use crate::dataset::Selection;
use crate::error::DashboardError;
use crate::loader::Dashboard;
use crate::model::{AGE_REFERENCE, AgeReferenceRow};

/// Shared immutable dashboard state
pub type SharedDashboard = Arc<Dashboard>;

/// The embedded single-page dashboard
const PAGE: &str = include_str!("page.html");

/// Raw query parameters of the dashboard filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    /// Department name or `all`
    pub departamento: Option<String>,
    /// Sex code or `all`
    pub sexo: Option<String>,
    /// Age-group code or `all`
    pub edad: Option<String>,
}

impl FilterQuery {
    /// Convert the raw parameters into a selection
    ///
    /// `all`, empty, and unparseable values mean "no filter".
    #[must_use]
    pub fn selection(&self) -> Selection {
        Selection {
            department: active_value(&self.departamento),
            sex: active_value(&self.sexo).and_then(|v| v.parse().ok()),
            age_group: active_value(&self.edad).and_then(|v| v.parse().ok()),
        }
    }
}

fn active_value(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "all")
        .map(str::to_string)
}

/// Dropdown options plus the age-group reference table
#[derive(Debug, Serialize)]
struct FilterOptions {
    departments: Vec<String>,
    sexes: Vec<SexOption>,
    age_groups: Vec<i32>,
    age_reference: &'static [AgeReferenceRow],
}

#[derive(Debug, Serialize)]
struct SexOption {
    value: i32,
    label: &'static str,
}

/// Dataset provenance shown in the page footer
#[derive(Debug, Serialize)]
struct Meta {
    source: &'static str,
    records: usize,
    mapped_causes: usize,
    catalog: &'static str,
    loaded_at: String,
}

fn internal_error(e: DashboardError) -> StatusCode {
    log::error!("Request failed: {e}");
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn index() -> Html<&'static str> {
    Html(PAGE)
}

async fn get_filters(State(dashboard): State<SharedDashboard>) -> Result<Json<FilterOptions>, StatusCode> {
    let departments = dashboard.data.departments().map_err(internal_error)?;
    let age_groups = dashboard.data.age_groups().map_err(internal_error)?;
    Ok(Json(FilterOptions {
        departments,
        sexes: vec![
            SexOption { value: 1, label: "Masculino" },
            SexOption { value: 2, label: "Femenino" },
            SexOption { value: 3, label: "Indeterminado" },
        ],
        age_groups,
        age_reference: AGE_REFERENCE,
    }))
}

async fn get_meta(State(dashboard): State<SharedDashboard>) -> Json<Meta> {
    Json(Meta {
        source: "DANE - Estadísticas Vitales 2019",
        records: dashboard.data.num_rows(),
        mapped_causes: dashboard.catalog.len(),
        catalog: match dashboard.catalog.source() {
            CatalogSource::Canonical => "tabla oficial",
            CatalogSource::Heuristic => "columnas inferidas",
            CatalogSource::Fallback => "diccionario de respaldo",
        },
        loaded_at: dashboard.loaded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}

async fn get_summary(
    State(dashboard): State<SharedDashboard>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<SummaryStats>, StatusCode> {
    charts::summary(&dashboard.data, &query.selection())
        .map(Json)
        .map_err(internal_error)
}

async fn get_departments(
    State(dashboard): State<SharedDashboard>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<DepartmentBars>, StatusCode> {
    charts::deaths_by_department(&dashboard.data, &query.selection())
        .map(Json)
        .map_err(internal_error)
}

async fn get_monthly(
    State(dashboard): State<SharedDashboard>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<MonthlyTrend>, StatusCode> {
    charts::monthly_trend(&dashboard.data, &query.selection())
        .map(Json)
        .map_err(internal_error)
}

async fn get_violent_cities(
    State(dashboard): State<SharedDashboard>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<CityBars>, StatusCode> {
    charts::most_violent_cities(&dashboard.data, &query.selection())
        .map(Json)
        .map_err(internal_error)
}

async fn get_safest_cities(
    State(dashboard): State<SharedDashboard>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<PieSlices>, StatusCode> {
    charts::lowest_mortality_cities(&dashboard.data, &query.selection())
        .map(Json)
        .map_err(internal_error)
}

async fn get_causes(
    State(dashboard): State<SharedDashboard>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<CauseTable>, StatusCode> {
    charts::leading_causes(&dashboard.data, &dashboard.catalog, &query.selection())
        .map(Json)
        .map_err(internal_error)
}

async fn get_sex_department(
    State(dashboard): State<SharedDashboard>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<SexByDepartment>, StatusCode> {
    charts::sex_by_department(&dashboard.data, &query.selection())
        .map(Json)
        .map_err(internal_error)
}

async fn get_age_groups(
    State(dashboard): State<SharedDashboard>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<AgeGroupBars>, StatusCode> {
    charts::age_group_distribution(&dashboard.data, &query.selection())
        .map(Json)
        .map_err(internal_error)
}

/// Build the dashboard router
#[must_use]
pub fn router(dashboard: SharedDashboard) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/filters", get(get_filters))
        .route("/api/meta", get(get_meta))
        .route("/api/summary", get(get_summary))
        .route("/api/departments", get(get_departments))
        .route("/api/monthly", get(get_monthly))
        .route("/api/violent-cities", get(get_violent_cities))
        .route("/api/safest-cities", get(get_safest_cities))
        .route("/api/causes", get(get_causes))
        .route("/api/sex-department", get(get_sex_department))
        .route("/api/age-groups", get(get_age_groups))
        .layer(CorsLayer::permissive())
        .with_state(dashboard)
}

/// Serve the dashboard until the process is stopped
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails
pub async fn serve(dashboard: Dashboard, config: &DashboardConfig) -> crate::error::Result<()> {
    let app = router(Arc::new(dashboard));
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    log::info!("Dashboard available at http://{}", config.bind_addr());
    axum::serve(listener, app).await?;
    Ok(())
}
