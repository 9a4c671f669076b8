// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use squad_roster_api::{
    ApiError, AssignCommanderRequest, AuditTimelineResponse, CommandResponse, CreateEventRequest,
    CreateEventResponse, JoinRequest, ListEventsResponse, ManagerRequest, PromoteRequest,
    RemoveMemberRequest, RequestContext, ResetRequest, SetDisplayRequest, SetStartsAtRequest,
    SetStatusRequest, SetTeamLabelsRequest, SetTeamTimeRequest, SetTimeEditorRoleRequest,
    SnapshotResponse, UnassignCommanderRequest, UpdateCapacityRequest,
};
use squad_roster_persistence::Persistence;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::info;

/// Squad Roster Server - HTTP server for the squad roster sign-up system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The store sits behind one mutex, so every roster operation runs alone.
#[derive(Clone)]
struct AppState {
    /// The enrollment store.
    persistence: Arc<Mutex<Persistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error class: `validation`, `unauthorized`, `not_found`,
    /// `state_conflict`, `capacity_exceeded` or `internal`.
    kind: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error class.
    kind: &'static str,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            kind: self.kind.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let (status, kind): (StatusCode, &'static str) = match err {
            ApiError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "validation"),
            ApiError::Unauthorized { .. } => (StatusCode::FORBIDDEN, "unauthorized"),
            ApiError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::DomainRuleViolation { .. } => (StatusCode::CONFLICT, "state_conflict"),
            ApiError::CapacityExceeded { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "capacity_exceeded")
            }
            ApiError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        Self {
            status,
            kind,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/events` endpoint.
///
/// Creates a new event. Guild administrators only.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<CreateEventResponse>, HttpError> {
    info!(
        requester_id = req.context.requester_id,
        guild_id = req.guild_id,
        name = %req.name,
        "Handling create_event request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateEventResponse =
        squad_roster_api::create_event(&mut persistence, &req, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/guilds/{guild_id}/events` endpoint.
async fn handle_list_events(
    AxumState(app_state): AxumState<AppState>,
    Path(guild_id): Path<u64>,
) -> Result<Json<ListEventsResponse>, HttpError> {
    info!(guild_id, "Handling list_events request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListEventsResponse = squad_roster_api::list_events(&mut persistence, guild_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/guilds/{guild_id}/events/{name}` endpoint.
///
/// Returns the event and its full roster.
async fn handle_get_snapshot(
    AxumState(app_state): AxumState<AppState>,
    Path((guild_id, name)): Path<(u64, String)>,
) -> Result<Json<SnapshotResponse>, HttpError> {
    info!(guild_id, name = %name, "Handling get_snapshot request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SnapshotResponse =
        squad_roster_api::get_snapshot(&mut persistence, guild_id, &name)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/guilds/{guild_id}/events/{name}/audit` endpoint.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path((guild_id, name)): Path<(u64, String)>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    info!(guild_id, name = %name, "Handling get_audit_timeline request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AuditTimelineResponse =
        squad_roster_api::get_audit_timeline(&mut persistence, guild_id, &name)?;
    drop(persistence);

    Ok(Json(response))
}

/// Generates a POST handler for one roster command.
///
/// Every command handler has the same shape: lock the store, run the API
/// handler with the current time, release the store.
macro_rules! command_handler {
    ($handler:ident, $api_fn:path, $request:ty, $label:literal) => {
        #[doc = concat!("Handler for the `", $label, "` command.")]
        async fn $handler(
            AxumState(app_state): AxumState<AppState>,
            Path((guild_id, name)): Path<(u64, String)>,
            Json(req): Json<$request>,
        ) -> Result<Json<CommandResponse>, HttpError> {
            info!(guild_id, name = %name, command = $label, "Handling command request");

            let mut persistence = app_state.persistence.lock().await;
            let response: CommandResponse =
                $api_fn(&mut persistence, guild_id, &name, &req, OffsetDateTime::now_utc())?;
            drop(persistence);

            Ok(Json(response))
        }
    };
}

command_handler!(handle_join, squad_roster_api::join, JoinRequest, "join");
command_handler!(handle_leave, squad_roster_api::leave, RequestContext, "leave");
command_handler!(
    handle_remove_member,
    squad_roster_api::remove_member,
    RemoveMemberRequest,
    "remove_member"
);
command_handler!(handle_promote, squad_roster_api::promote, PromoteRequest, "promote");
command_handler!(
    handle_assign_commander,
    squad_roster_api::assign_commander,
    AssignCommanderRequest,
    "assign_commander"
);
command_handler!(
    handle_unassign_commander,
    squad_roster_api::unassign_commander,
    UnassignCommanderRequest,
    "unassign_commander"
);
command_handler!(
    handle_set_status,
    squad_roster_api::set_status,
    SetStatusRequest,
    "set_status"
);
command_handler!(handle_reset, squad_roster_api::reset, ResetRequest, "reset");
command_handler!(
    handle_update_capacity,
    squad_roster_api::update_capacity,
    UpdateCapacityRequest,
    "update_capacity"
);
command_handler!(
    handle_set_team_labels,
    squad_roster_api::set_team_labels,
    SetTeamLabelsRequest,
    "set_team_labels"
);
command_handler!(
    handle_set_starts_at,
    squad_roster_api::set_starts_at,
    SetStartsAtRequest,
    "set_starts_at"
);
command_handler!(
    handle_set_team_time,
    squad_roster_api::set_team_time,
    SetTeamTimeRequest,
    "set_team_time"
);
command_handler!(
    handle_set_time_editor_role,
    squad_roster_api::set_time_editor_role,
    SetTimeEditorRoleRequest,
    "set_time_editor_role"
);
command_handler!(
    handle_set_display,
    squad_roster_api::set_display,
    SetDisplayRequest,
    "set_display"
);
command_handler!(
    handle_add_manager,
    squad_roster_api::add_manager,
    ManagerRequest,
    "add_manager"
);
command_handler!(
    handle_remove_manager,
    squad_roster_api::remove_manager,
    ManagerRequest,
    "remove_manager"
);

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    const EVENT: &str = "/guilds/{guild_id}/events/{name}";

    Router::new()
        .route("/events", post(handle_create_event))
        .route("/guilds/{guild_id}/events", get(handle_list_events))
        .route(EVENT, get(handle_get_snapshot))
        .route(&format!("{EVENT}/audit"), get(handle_get_audit_timeline))
        .route(&format!("{EVENT}/join"), post(handle_join))
        .route(&format!("{EVENT}/leave"), post(handle_leave))
        .route(&format!("{EVENT}/remove"), post(handle_remove_member))
        .route(&format!("{EVENT}/promote"), post(handle_promote))
        .route(
            &format!("{EVENT}/commanders/assign"),
            post(handle_assign_commander),
        )
        .route(
            &format!("{EVENT}/commanders/unassign"),
            post(handle_unassign_commander),
        )
        .route(&format!("{EVENT}/status"), post(handle_set_status))
        .route(&format!("{EVENT}/reset"), post(handle_reset))
        .route(&format!("{EVENT}/capacity"), post(handle_update_capacity))
        .route(&format!("{EVENT}/labels"), post(handle_set_team_labels))
        .route(&format!("{EVENT}/starts_at"), post(handle_set_starts_at))
        .route(&format!("{EVENT}/team_time"), post(handle_set_team_time))
        .route(
            &format!("{EVENT}/time_editor_role"),
            post(handle_set_time_editor_role),
        )
        .route(&format!("{EVENT}/display"), post(handle_set_display))
        .route(&format!("{EVENT}/managers"), post(handle_add_manager))
        .route(
            &format!("{EVENT}/managers/remove"),
            post(handle_remove_manager),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Squad Roster Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
