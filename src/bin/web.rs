//! Single binary web server exposing the fixture engine via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use league_fixtures_web::{
    clear_fixtures, generate_fixtures, preview_fixtures, store::MemoryStore, Fixture,
    FixtureStore, ScheduleError, SchedulingConfig, Season, SeasonId, SeasonStatus, SeasonStore,
    Team, TeamId, TeamStore,
};
use serde::Deserialize;
use std::collections::BTreeMap;

/// In-memory state: all three stores behind one lock.
type AppState = Data<MemoryStore>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateSeasonBody {
    name: String,
    league_name: String,
    season_year: i32,
    #[serde(default)]
    max_teams: Option<u32>,
    scheduling: SchedulingConfig,
}

#[derive(Deserialize)]
struct SetStatusBody {
    status: SeasonStatus,
}

#[derive(Deserialize)]
struct RegisterTeamBody {
    name: String,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Deserialize, Default)]
struct GenerateBody {
    #[serde(default)]
    preview: bool,
}

/// Path segment: season id (e.g. /api/seasons/{id})
#[derive(Deserialize)]
struct SeasonPath {
    id: SeasonId,
}

/// Path segments: season id and team id (e.g. /api/seasons/{id}/teams/{team_id})
#[derive(Deserialize)]
struct SeasonTeamPath {
    id: SeasonId,
    team_id: TeamId,
}

/// Map a typed engine/store error to the HTTP response the caller expects.
/// Scheduling-constraint failures carry a human-readable suggestion.
fn error_response(err: &ScheduleError) -> HttpResponse {
    match err {
        ScheduleError::SeasonNotFound(_) | ScheduleError::TeamNotFound(_) => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": err.to_string() }))
        }
        ScheduleError::ConcurrentGenerationConflict => {
            HttpResponse::Conflict().json(serde_json::json!({ "error": err.to_string() }))
        }
        ScheduleError::Scheduling(failure) => {
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Scheduling constraint error",
                "message": failure.to_string(),
                "suggestion": failure.suggestion(),
            }))
        }
        ScheduleError::StorePoisoned => {
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": err.to_string() }))
        }
        _ => HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() })),
    }
}

fn fixtures_by_matchday(fixtures: &[Fixture]) -> BTreeMap<u32, Vec<&Fixture>> {
    let mut grouped: BTreeMap<u32, Vec<&Fixture>> = BTreeMap::new();
    for fixture in fixtures {
        grouped.entry(fixture.matchday_number).or_default().push(fixture);
    }
    grouped
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-fixtures-web",
    })
}

/// Create a season (returns it with id; client stores id for subsequent requests).
#[post("/api/seasons")]
async fn api_create_season(state: AppState, body: Json<CreateSeasonBody>) -> HttpResponse {
    let body = body.into_inner();
    if let Err(e) = body.scheduling.validate() {
        return error_response(&e);
    }
    let mut season = Season::new(
        body.name,
        body.league_name,
        body.season_year,
        body.scheduling,
    );
    season.max_teams = body.max_teams;
    let created = season.clone();
    match state.insert_season(season) {
        Ok(()) => HttpResponse::Ok().json(created),
        Err(e) => error_response(&e),
    }
}

/// Get a season with its registered teams (404 if not found).
#[get("/api/seasons/{id}")]
async fn api_get_season(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    let season = match state.season(path.id) {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };
    match state.eligible_teams(path.id) {
        Ok(teams) => HttpResponse::Ok().json(serde_json::json!({
            "season": season,
            "teams": teams,
        })),
        Err(e) => error_response(&e),
    }
}

/// Update season lifecycle status.
#[put("/api/seasons/{id}/status")]
async fn api_set_season_status(
    state: AppState,
    path: Path<SeasonPath>,
    body: Json<SetStatusBody>,
) -> HttpResponse {
    match state.update_status(path.id, body.status) {
        Ok(season) => HttpResponse::Ok().json(season),
        Err(e) => error_response(&e),
    }
}

/// Update the scheduling window (draft/registration seasons only).
#[put("/api/seasons/{id}/scheduling")]
async fn api_update_scheduling(
    state: AppState,
    path: Path<SeasonPath>,
    body: Json<SchedulingConfig>,
) -> HttpResponse {
    match state.update_scheduling(path.id, body.into_inner()) {
        Ok(season) => HttpResponse::Ok().json(season),
        Err(e) => error_response(&e),
    }
}

/// Register a team for a season (names are unique, case-insensitive).
#[post("/api/seasons/{id}/teams")]
async fn api_register_team(
    state: AppState,
    path: Path<SeasonPath>,
    body: Json<RegisterTeamBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let team = Team::new(body.name.trim(), body.color);
    if team.name.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Team name is required" }));
    }
    match state.register_team(path.id, team, Utc::now().naive_utc()) {
        Ok(registration) => HttpResponse::Ok().json(registration),
        Err(e) => error_response(&e),
    }
}

/// List the eligible (registered/confirmed) teams of a season.
#[get("/api/seasons/{id}/teams")]
async fn api_list_teams(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    match state.eligible_teams(path.id) {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => error_response(&e),
    }
}

/// Confirm a team's registration.
#[post("/api/seasons/{id}/teams/{team_id}/confirm")]
async fn api_confirm_team(state: AppState, path: Path<SeasonTeamPath>) -> HttpResponse {
    match state.confirm_team(path.id, path.team_id) {
        Ok(registration) => HttpResponse::Ok().json(registration),
        Err(e) => error_response(&e),
    }
}

/// Withdraw a team from a season.
#[delete("/api/seasons/{id}/teams/{team_id}")]
async fn api_withdraw_team(state: AppState, path: Path<SeasonTeamPath>) -> HttpResponse {
    match state.withdraw_team(path.id, path.team_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => error_response(&e),
    }
}

/// Generate fixtures for a season. Body: {"preview": bool}. Preview computes
/// without persisting; commit replaces the season's fixtures atomically.
#[post("/api/seasons/{id}/fixtures/generate")]
async fn api_generate_fixtures(
    state: AppState,
    path: Path<SeasonPath>,
    body: Option<Json<GenerateBody>>,
) -> HttpResponse {
    let preview = body.map(|b| b.preview).unwrap_or(false);
    let result = if preview {
        preview_fixtures(state.get_ref(), path.id)
    } else {
        generate_fixtures(state.get_ref(), path.id)
    };
    match result {
        Ok(outcome) => {
            let verb = if preview { "Preview generated" } else { "Successfully generated" };
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "preview": preview,
                "message": format!(
                    "{}: {} matches across {} matchdays",
                    verb,
                    outcome.fixtures.len(),
                    outcome.matchday_count
                ),
                "data": {
                    "fixtures": outcome.fixtures,
                    "matchdays": outcome.matchday_count,
                },
            }))
        }
        Err(e) => error_response(&e),
    }
}

/// List a season's fixtures, plus a matchday-grouped view.
#[get("/api/seasons/{id}/fixtures")]
async fn api_get_fixtures(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    match state.fixtures(path.id) {
        Ok(fixtures) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "data": {
                "fixtures": fixtures,
                "fixtures_by_matchday": fixtures_by_matchday(&fixtures),
            },
        })),
        Err(e) => error_response(&e),
    }
}

/// Delete a season's fixtures (draft/registration seasons only).
#[delete("/api/seasons/{id}/fixtures")]
async fn api_delete_fixtures(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    match clear_fixtures(state.get_ref(), path.id) {
        Ok(removed) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "deleted": removed,
        })),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(MemoryStore::new());

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_season)
            .service(api_get_season)
            .service(api_set_season_status)
            .service(api_update_scheduling)
            .service(api_register_team)
            .service(api_list_teams)
            .service(api_confirm_team)
            .service(api_withdraw_team)
            .service(api_generate_fixtures)
            .service(api_get_fixtures)
            .service(api_delete_fixtures)
    })
    .bind(bind)?
    .run()
    .await
}
