//! Stateless web endpoint for the bracket engine: every request carries the full snapshot.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, and PRODE_COMBINATIONS_CSV (alternate third-place table).

use actix_web::{
    get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use prode_bracket::{
    propagate, qualification_for, standings_for, CombinationTable, EngineError, ErrorKind,
    PlayoffGraph, TournamentSnapshot,
};
use serde::{Deserialize, Serialize};
use std::fs::File;

/// Shared, immutable reference data. No per-tournament state lives in the server.
type AppState = Data<CombinationTable>;

/// Env var naming a CSV file that replaces the embedded combination table.
const COMBINATIONS_PATH_ENV: &str = "PRODE_COMBINATIONS_CSV";

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
    combinations: usize,
}

#[derive(Serialize)]
struct DependentsResponse {
    game_number: u32,
    dependents: Vec<u32>,
    downstream: Vec<u32>,
}

/// Path segment: playoff game number (e.g. /api/bracket/games/{game_number}/dependents)
#[derive(Deserialize)]
struct GamePath {
    game_number: u32,
}

/// Path segment: combination key (e.g. /api/combinations/{key})
#[derive(Deserialize)]
struct CombinationPath {
    key: String,
}

/// Data problems are the caller's to fix (422); configuration problems are ours (500).
fn error_response(e: &EngineError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::DataIntegrity => {
            log::warn!("Rejected snapshot: {}", e);
            HttpResponse::UnprocessableEntity().json(body)
        }
        ErrorKind::Configuration => {
            log::error!("Configuration error: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

#[get("/api/health")]
async fn api_health(table: AppState) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "prode-bracket",
        combinations: table.len(),
    })
}

/// Run a full propagation pass and return the changes to persist.
#[post("/api/bracket/propagate")]
async fn api_propagate(table: AppState, body: Json<TournamentSnapshot>) -> HttpResponse {
    match propagate(&body, &table) {
        Ok(outcome) => {
            log::info!(
                "Tournament {}: {} slot change(s), {} retraction(s)",
                body.tournament_id,
                outcome.changes.len(),
                outcome.retractions().count()
            );
            HttpResponse::Ok().json(outcome)
        }
        Err(e) => error_response(&e),
    }
}

/// Group standings only.
#[post("/api/bracket/standings")]
async fn api_standings(body: Json<TournamentSnapshot>) -> HttpResponse {
    match standings_for(&body) {
        Ok(standings) => HttpResponse::Ok().json(standings),
        Err(e) => error_response(&e),
    }
}

/// Third-place qualification only.
#[post("/api/bracket/qualification")]
async fn api_qualification(table: AppState, body: Json<TournamentSnapshot>) -> HttpResponse {
    match qualification_for(&body, &table) {
        Ok(qualification) => HttpResponse::Ok().json(qualification),
        Err(e) => error_response(&e),
    }
}

/// Which games depend on a given game (directly and transitively).
#[post("/api/bracket/games/{game_number}/dependents")]
async fn api_dependents(path: Path<GamePath>, body: Json<TournamentSnapshot>) -> HttpResponse {
    let graph = match PlayoffGraph::build(&body.playoff_games) {
        Ok(graph) => graph,
        Err(e) => return error_response(&e),
    };
    if graph.game(path.game_number).is_none() {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "No such game" }));
    }
    HttpResponse::Ok().json(DependentsResponse {
        game_number: path.game_number,
        dependents: graph.dependents_of(path.game_number),
        downstream: graph.downstream_of(path.game_number),
    })
}

/// Look up one row of the combination table.
#[get("/api/combinations/{key}")]
async fn api_combination(table: AppState, path: Path<CombinationPath>) -> HttpResponse {
    match table.lookup(&path.key.to_ascii_uppercase()) {
        Ok(rule) => HttpResponse::Ok().json(rule),
        Err(EngineError::InvalidCombinationKey(key)) => HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": format!("Invalid combination key {key}") })),
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() })),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Embedded table unless PRODE_COMBINATIONS_CSV points at a file. Any problem aborts startup.
fn load_combination_table() -> std::io::Result<CombinationTable> {
    let table = match std::env::var(COMBINATIONS_PATH_ENV) {
        Ok(path) if !path.is_empty() => {
            log::info!("Loading third-place combinations from {}", path);
            let file = File::open(&path)?;
            CombinationTable::from_csv(file, prode_bracket::reference::WORLD_CUP_2026_GROUPS)
        }
        _ => CombinationTable::world_cup_2026(),
    };
    table.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let table = match load_combination_table() {
        Ok(table) => Data::new(table),
        Err(e) => {
            log::error!("Cannot load third-place combination table: {}", e);
            return Err(e);
        }
    };

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(table.clone())
            .service(api_health)
            .service(api_propagate)
            .service(api_standings)
            .service(api_qualification)
            .service(api_dependents)
            .service(api_combination)
    })
    .bind(bind)?
    .run()
    .await
}
