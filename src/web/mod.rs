//! Web API module for ZoneForge.
//!
//! This module provides a REST API for a browser-based screen layout editor,
//! exposing the component catalog, layout files in a workspace directory,
//! and the placement and validation engines.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/components` - List components (optional `?screen=` and `?category=`)
//! - `GET /api/components/{id}` - Get one component definition
//! - `GET /api/layouts` - List layout files
//! - `GET /api/layouts/{filename}` - Load a layout file
//! - `PUT /api/layouts/{filename}` - Save a layout file (refused while it has errors)
//! - `GET /api/layouts/{filename}/validate` - Validate a saved layout
//! - `POST /api/validate` - Validate a zone list
//! - `POST /api/zones/{operation}` - Apply one placement operation to a zone list
//!
//! Placement endpoints are stateless: the request carries the current zone list
//! and the response carries the new one.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::branding::APP_DISPLAY_NAME;
use crate::config::Config;
use crate::models::{
    ComponentCategory, ComponentDefinition, ConfigValue, Diagnostic, DiagnosticSummary,
    Position, ScreenLayout, ScreenType, ZoneStore,
};
use crate::placement::{Direction, Placement, PlacementEngine};
use crate::registry::ComponentRegistry;
use crate::services::layouts::LAYOUT_EXTENSION;
use crate::services::{LayoutService, LayoutSummary};
use crate::validation;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Component catalog (immutable after load)
    registry: &'static ComponentRegistry,
    /// Working directory for layout files
    workspace_root: PathBuf,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: Config, workspace_root: PathBuf) -> anyhow::Result<Self> {
        let registry = ComponentRegistry::builtin()?;
        Ok(Self {
            config: Arc::new(config),
            registry,
            workspace_root,
        })
    }

    /// Returns the workspace root directory.
    #[must_use]
    pub fn workspace_root(&self) -> &PathBuf {
        &self.workspace_root
    }

    /// Returns the configuration the server was started with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn engine(&self) -> PlacementEngine<'static> {
        PlacementEngine::new(self.registry)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Query parameters for the component list.
#[derive(Debug, Deserialize)]
pub struct ComponentQuery {
    /// Only components for this screen.
    pub screen: Option<ScreenType>,
    /// Only components in this category.
    pub category: Option<ComponentCategory>,
}

/// Component list response.
#[derive(Debug, Serialize)]
pub struct ComponentListResponse {
    /// Matching definitions in catalog order.
    pub components: Vec<ComponentDefinition>,
    /// Number of matches.
    pub total: usize,
}

/// Layout list response.
#[derive(Debug, Serialize)]
pub struct LayoutListResponse {
    /// Layout files in the workspace.
    pub layouts: Vec<LayoutSummary>,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

/// Validation request for an unsaved zone list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    /// Current zones.
    #[serde(default)]
    pub zones: ZoneStore,
    /// Screen type.
    pub screen: ScreenType,
    /// Optional theme ID.
    pub theme_id: Option<String>,
}

/// Validation result response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    /// Findings in rule order.
    pub diagnostics: Vec<Diagnostic>,
    /// Counts per severity.
    pub summary: DiagnosticSummary,
    /// Whether the layout may be saved.
    pub can_save: bool,
}

impl ValidationResponse {
    fn build(
        registry: &ComponentRegistry,
        zones: &ZoneStore,
        screen: ScreenType,
        theme: Option<&str>,
    ) -> Self {
        let diagnostics = validation::validate(registry, zones.zones(), screen, theme);
        Self {
            summary: validation::summarize(&diagnostics),
            can_save: validation::can_save(&diagnostics),
            diagnostics,
        }
    }
}

/// Result of a placement operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonesResponse {
    /// Zones after the operation.
    pub zones: ZoneStore,
    /// ID of the created zone, for add and duplicate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
}

impl From<ZoneStore> for ZonesResponse {
    fn from(zones: ZoneStore) -> Self {
        Self {
            zones,
            zone_id: None,
        }
    }
}

impl From<Placement> for ZonesResponse {
    fn from(placement: Placement) -> Self {
        Self {
            zones: placement.store,
            zone_id: placement.zone_id,
        }
    }
}

/// Add a zone.
#[derive(Debug, Deserialize)]
pub struct AddZoneRequest {
    /// Current zones.
    #[serde(default)]
    pub zones: ZoneStore,
    /// Component ID.
    pub component: String,
    /// Target position; defaults to the component's default position.
    pub position: Option<Position>,
    /// Initial variant.
    pub variant: Option<String>,
}

/// Operation on one zone (remove, toggle, duplicate).
#[derive(Debug, Deserialize)]
pub struct ZoneIdRequest {
    /// Current zones.
    #[serde(default)]
    pub zones: ZoneStore,
    /// Zone ID.
    pub id: String,
}

/// Reorder a zone within its position.
#[derive(Debug, Deserialize)]
pub struct ReorderZoneRequest {
    /// Current zones.
    #[serde(default)]
    pub zones: ZoneStore,
    /// Zone ID.
    pub id: String,
    /// Direction.
    pub direction: Direction,
}

/// Move a zone to another position.
#[derive(Debug, Deserialize)]
pub struct MoveZoneRequest {
    /// Current zones.
    #[serde(default)]
    pub zones: ZoneStore,
    /// Zone ID.
    pub id: String,
    /// Target position.
    pub position: Position,
}

/// Drop one zone onto another.
#[derive(Debug, Deserialize)]
pub struct DropZoneRequest {
    /// Current zones.
    #[serde(default)]
    pub zones: ZoneStore,
    /// Dragged zone ID.
    pub source: String,
    /// Zone ID it is dropped onto.
    pub target: String,
}

/// Set a config value.
#[derive(Debug, Deserialize)]
pub struct SetConfigRequest {
    /// Current zones.
    #[serde(default)]
    pub zones: ZoneStore,
    /// Zone ID.
    pub id: String,
    /// Config key.
    pub key: String,
    /// New value.
    pub value: ConfigValue,
}

/// Change or clear a variant.
#[derive(Debug, Deserialize)]
pub struct SetVariantRequest {
    /// Current zones.
    #[serde(default)]
    pub zones: ZoneStore,
    /// Zone ID.
    pub id: String,
    /// Variant ID, or null to clear.
    pub variant: Option<String>,
}

/// Set or clear size overrides.
#[derive(Debug, Deserialize)]
pub struct ResizeZoneRequest {
    /// Current zones.
    #[serde(default)]
    pub zones: ZoneStore,
    /// Zone ID.
    pub id: String,
    /// Width override.
    pub width: Option<u32>,
    /// Height override.
    pub height: Option<u32>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Validates a filename to prevent path traversal attacks.
fn validate_filename(filename: &str) -> Result<&str, ApiError> {
    if filename.is_empty() {
        return Err(ApiError::new("Filename cannot be empty"));
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ApiError::new(
            "Invalid filename: path traversal not allowed",
        ));
    }

    if filename.starts_with('.') {
        return Err(ApiError::new("Invalid filename: hidden files not allowed"));
    }

    Ok(filename)
}

/// Resolves a request filename to a path in the workspace, adding `.json` if missing.
fn layout_path(state: &AppState, filename: &str) -> ApiResult<(String, PathBuf)> {
    let filename = validate_filename(filename).map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;

    let filename = if std::path::Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LAYOUT_EXTENSION))
    {
        filename.to_string()
    } else {
        format!("{filename}.{LAYOUT_EXTENSION}")
    };

    let path = state.workspace_root.join(&filename);
    Ok((filename, path))
}

fn load_existing(state: &AppState, filename: &str) -> ApiResult<ScreenLayout> {
    let (filename, path) = layout_path(state, filename)?;

    if !path.exists() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new(format!("Layout file not found: {filename}"))),
        ));
    }

    LayoutService::load(&path).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details(
                "Failed to load layout",
                format!("{e:#}"),
            )),
        )
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/components - List component definitions.
async fn list_components(
    State(state): State<AppState>,
    Query(query): Query<ComponentQuery>,
) -> Json<ComponentListResponse> {
    let components: Vec<ComponentDefinition> = state
        .registry
        .definitions()
        .iter()
        .filter(|d| query.screen.is_none_or(|s| d.layout_type == s))
        .filter(|d| query.category.is_none_or(|c| d.category == c))
        .cloned()
        .collect();

    let total = components.len();
    Json(ComponentListResponse { components, total })
}

/// GET /api/components/{id} - Get one component definition.
async fn get_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ComponentDefinition>> {
    state
        .registry
        .definition_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiError::new(format!("Unknown component: {id}"))),
            )
        })
}

/// GET /api/layouts - List all layout files in the workspace.
async fn list_layouts(State(state): State<AppState>) -> ApiResult<Json<LayoutListResponse>> {
    let layouts = LayoutService::list(&state.workspace_root).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details(
                "Failed to read workspace directory",
                format!("{e:#}"),
            )),
        )
    })?;

    Ok(Json(LayoutListResponse { layouts }))
}

/// GET /api/layouts/{filename} - Load a specific layout file.
async fn get_layout(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Json<ScreenLayout>> {
    load_existing(&state, &filename).map(Json)
}

/// PUT /api/layouts/{filename} - Save a layout file.
///
/// Layouts with error diagnostics are refused with 422.
async fn save_layout(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Json(layout): Json<ScreenLayout>,
) -> ApiResult<StatusCode> {
    let (_, path) = layout_path(&state, &filename)?;

    layout.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details("Invalid layout", e.to_string())),
        )
    })?;

    let report = ValidationResponse::build(
        state.registry,
        &layout.zones,
        layout.metadata.screen,
        layout.theme(),
    );
    if !report.can_save {
        let details = report
            .diagnostics
            .iter()
            .filter(|d| d.is_error())
            .map(|d| d.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError::with_details(
                "Layout has validation errors",
                details,
            )),
        ));
    }

    LayoutService::save(&layout, &path).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details(
                "Failed to save layout",
                format!("{e:#}"),
            )),
        )
    })?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/layouts/{filename}/validate - Validate a saved layout.
async fn validate_layout(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Json<ValidationResponse>> {
    let layout = load_existing(&state, &filename)?;
    Ok(Json(ValidationResponse::build(
        state.registry,
        &layout.zones,
        layout.metadata.screen,
        layout.theme(),
    )))
}

/// POST /api/validate - Validate an unsaved zone list.
async fn validate_zones(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> Json<ValidationResponse> {
    Json(ValidationResponse::build(
        state.registry,
        &request.zones,
        request.screen,
        request.theme_id.as_deref(),
    ))
}

/// POST /api/zones/add
async fn add_zone(
    State(state): State<AppState>,
    Json(request): Json<AddZoneRequest>,
) -> Json<ZonesResponse> {
    let position = request.position.or_else(|| {
        state
            .registry
            .definition_by_id(&request.component)
            .map(|d| d.default_position)
    });

    let Some(position) = position else {
        return Json(request.zones.into());
    };

    Json(
        state
            .engine()
            .add(
                &request.zones,
                &request.component,
                position,
                request.variant.as_deref(),
            )
            .into(),
    )
}

/// POST /api/zones/remove
async fn remove_zone(
    State(state): State<AppState>,
    Json(request): Json<ZoneIdRequest>,
) -> Json<ZonesResponse> {
    Json(state.engine().remove(&request.zones, &request.id).into())
}

/// POST /api/zones/toggle
async fn toggle_zone(
    State(state): State<AppState>,
    Json(request): Json<ZoneIdRequest>,
) -> Json<ZonesResponse> {
    Json(
        state
            .engine()
            .toggle_visibility(&request.zones, &request.id)
            .into(),
    )
}

/// POST /api/zones/reorder
async fn reorder_zone(
    State(state): State<AppState>,
    Json(request): Json<ReorderZoneRequest>,
) -> Json<ZonesResponse> {
    Json(
        state
            .engine()
            .reorder(&request.zones, &request.id, request.direction)
            .into(),
    )
}

/// POST /api/zones/move
async fn move_zone(
    State(state): State<AppState>,
    Json(request): Json<MoveZoneRequest>,
) -> Json<ZonesResponse> {
    Json(
        state
            .engine()
            .move_to(&request.zones, &request.id, request.position)
            .into(),
    )
}

/// POST /api/zones/drop
async fn drop_zone(
    State(state): State<AppState>,
    Json(request): Json<DropZoneRequest>,
) -> Json<ZonesResponse> {
    Json(
        state
            .engine()
            .drop_onto(&request.zones, &request.source, &request.target)
            .into(),
    )
}

/// POST /api/zones/duplicate
async fn duplicate_zone(
    State(state): State<AppState>,
    Json(request): Json<ZoneIdRequest>,
) -> Json<ZonesResponse> {
    Json(state.engine().duplicate(&request.zones, &request.id).into())
}

/// POST /api/zones/config
async fn set_zone_config(
    State(state): State<AppState>,
    Json(request): Json<SetConfigRequest>,
) -> Json<ZonesResponse> {
    Json(
        state
            .engine()
            .set_config(&request.zones, &request.id, &request.key, request.value)
            .into(),
    )
}

/// POST /api/zones/variant
async fn set_zone_variant(
    State(state): State<AppState>,
    Json(request): Json<SetVariantRequest>,
) -> Json<ZonesResponse> {
    Json(
        state
            .engine()
            .set_variant(&request.zones, &request.id, request.variant.as_deref())
            .into(),
    )
}

/// POST /api/zones/resize
async fn resize_zone(
    State(state): State<AppState>,
    Json(request): Json<ResizeZoneRequest>,
) -> Json<ZonesResponse> {
    Json(
        state
            .engine()
            .resize(&request.zones, &request.id, request.width, request.height)
            .into(),
    )
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the server is meant to run on the operator's machine
    // next to the editor frontend.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Component catalog
        .route("/api/components", get(list_components))
        .route("/api/components/{id}", get(get_component))
        // Layout files
        .route("/api/layouts", get(list_layouts))
        .route("/api/layouts/{filename}", get(get_layout).put(save_layout))
        .route("/api/layouts/{filename}/validate", get(validate_layout))
        // Validation
        .route("/api/validate", post(validate_zones))
        // Placement
        .route("/api/zones/add", post(add_zone))
        .route("/api/zones/remove", post(remove_zone))
        .route("/api/zones/toggle", post(toggle_zone))
        .route("/api/zones/reorder", post(reorder_zone))
        .route("/api/zones/move", post(move_zone))
        .route("/api/zones/drop", post(drop_zone))
        .route("/api/zones/duplicate", post(duplicate_zone))
        .route("/api/zones/config", post(set_zone_config))
        .route("/api/zones/variant", post(set_zone_variant))
        .route("/api/zones/resize", post(resize_zone))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the catalog fails to load or the server fails to start.
pub async fn run_server(
    config: Config,
    workspace_root: PathBuf,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let state = AppState::new(config, workspace_root)?;
    let app = create_router(state);

    info!("Starting {APP_DISPLAY_NAME} web server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
