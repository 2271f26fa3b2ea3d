use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use log::{info, warn};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

use crate::config::WebConfig;
use crate::example::{
    example_games, example_judges, write_example_games, write_example_judges, GAMES_FILE,
    JUDGES_FILE,
};
use crate::export::{
    assignment_rows, to_csv_bytes, workload_rows, AssignmentRow, ExportError, WorkloadRow,
    ASSIGNMENTS_FILE, WORKLOAD_FILE,
};
use crate::parser::{load_games_from_reader, load_judges_from_reader};
use crate::schedule::{schedule_judges, total_slots, Game, Judge};

/// In-memory state for one browser session's worth of data. Nothing is persisted.
#[derive(Default)]
pub struct AppState {
    pub judges: Mutex<Vec<Judge>>,
    pub games: Mutex<Vec<Game>>,
    pub results: Mutex<Option<ScheduleResults>>,
}

/// Report rows from the last successful run, always replaced together
#[derive(Debug, Clone)]
pub struct ScheduleResults {
    pub assignments: Vec<AssignmentRow>,
    pub workload: Vec<WorkloadRow>,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    judges: usize,
    games: usize,
    total_assignments_needed: usize,
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    success: bool,
    assignments: Vec<AssignmentRow>,
    workload: Vec<WorkloadRow>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("State lock poisoned"))
}

fn failure(status: StatusCode, message: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "success": false,
        "error": message.to_string()
    }))
}

fn csv_download(bytes: Vec<u8>, filename: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename.to_string())],
        })
        .body(bytes)
}

fn export_failure(err: ExportError) -> HttpResponse {
    match err {
        ExportError::NothingToExport(_) => failure(StatusCode::NOT_FOUND, err),
        _ => failure(StatusCode::INTERNAL_SERVER_ERROR, err),
    }
}

// Judges CSV upload endpoint
async fn upload_judges(body: web::Bytes, state: web::Data<AppState>) -> Result<HttpResponse> {
    match load_judges_from_reader(body.as_ref()) {
        Ok(judges) => {
            let count = judges.len();
            *lock(&state.judges)? = judges;
            Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "count": count})))
        }
        Err(e) => {
            warn!("Rejected judges upload: {}", e);
            Ok(failure(StatusCode::BAD_REQUEST, e))
        }
    }
}

// Games CSV upload endpoint
async fn upload_games(body: web::Bytes, state: web::Data<AppState>) -> Result<HttpResponse> {
    match load_games_from_reader(body.as_ref()) {
        Ok(games) => {
            let count = games.len();
            *lock(&state.games)? = games;
            Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "count": count})))
        }
        Err(e) => {
            warn!("Rejected games upload: {}", e);
            Ok(failure(StatusCode::BAD_REQUEST, e))
        }
    }
}

// Replaces everything with the example data
async fn load_example(state: web::Data<AppState>) -> Result<HttpResponse> {
    *lock(&state.judges)? = example_judges();
    *lock(&state.games)? = example_games();
    *lock(&state.results)? = None;

    info!("Example data loaded");
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

async fn get_summary(state: web::Data<AppState>) -> Result<HttpResponse> {
    let judges = lock(&state.judges)?.len();
    let games = lock(&state.games)?;

    Ok(HttpResponse::Ok().json(SummaryResponse {
        judges,
        games: games.len(),
        total_assignments_needed: total_slots(&games),
    }))
}

// Runs the scheduler. A failed run leaves the previous results in place.
async fn run_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let judges = lock(&state.judges)?.clone();
    let games = lock(&state.games)?.clone();

    match schedule_judges(&judges, &games) {
        Ok(schedule) => {
            let assignments = assignment_rows(&schedule, &judges);
            let workload = workload_rows(&schedule);

            *lock(&state.results)? = Some(ScheduleResults {
                assignments: assignments.clone(),
                workload: workload.clone(),
            });

            Ok(HttpResponse::Ok().json(ScheduleResponse {
                success: true,
                assignments,
                workload,
            }))
        }
        Err(e) => {
            warn!("Scheduling failed: {}", e);
            Ok(failure(StatusCode::UNPROCESSABLE_ENTITY, e))
        }
    }
}

async fn get_assignments(state: web::Data<AppState>) -> Result<HttpResponse> {
    match lock(&state.results)?.as_ref() {
        Some(results) => Ok(HttpResponse::Ok().json(&results.assignments)),
        None => Ok(failure(StatusCode::NOT_FOUND, "No schedule generated yet")),
    }
}

async fn get_workload(state: web::Data<AppState>) -> Result<HttpResponse> {
    match lock(&state.results)?.as_ref() {
        Some(results) => Ok(HttpResponse::Ok().json(&results.workload)),
        None => Ok(failure(StatusCode::NOT_FOUND, "No schedule generated yet")),
    }
}

async fn export_assignments(state: web::Data<AppState>) -> Result<HttpResponse> {
    let rows = lock(&state.results)?
        .as_ref()
        .map(|r| r.assignments.clone())
        .unwrap_or_default();
    if rows.is_empty() {
        return Ok(export_failure(ExportError::NothingToExport("assignments")));
    }

    match to_csv_bytes(&rows) {
        Ok(bytes) => Ok(csv_download(bytes, &format!("{}.csv", ASSIGNMENTS_FILE))),
        Err(e) => Ok(export_failure(e)),
    }
}

async fn export_workload(state: web::Data<AppState>) -> Result<HttpResponse> {
    let rows = lock(&state.results)?
        .as_ref()
        .map(|r| r.workload.clone())
        .unwrap_or_default();
    if rows.is_empty() {
        return Ok(export_failure(ExportError::NothingToExport("workload data")));
    }

    match to_csv_bytes(&rows) {
        Ok(bytes) => Ok(csv_download(bytes, &format!("{}.csv", WORKLOAD_FILE))),
        Err(e) => Ok(export_failure(e)),
    }
}

async fn example_judges_csv() -> Result<HttpResponse> {
    let mut bytes = Vec::new();
    match write_example_judges(&mut bytes) {
        Ok(()) => Ok(csv_download(bytes, JUDGES_FILE)),
        Err(e) => Ok(export_failure(e)),
    }
}

async fn example_games_csv() -> Result<HttpResponse> {
    let mut bytes = Vec::new();
    match write_example_games(&mut bytes) {
        Ok(()) => Ok(csv_download(bytes, GAMES_FILE)),
        Err(e) => Ok(export_failure(e)),
    }
}

// HTML page handler
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers every page and API route
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/judges", web::post().to(upload_judges))
        .route("/api/games", web::post().to(upload_games))
        .route("/api/example", web::post().to(load_example))
        .route("/api/summary", web::get().to(get_summary))
        .route("/api/schedule", web::post().to(run_schedule))
        .route("/api/assignments", web::get().to(get_assignments))
        .route("/api/workload", web::get().to(get_workload))
        .route("/api/export/assignments.csv", web::get().to(export_assignments))
        .route("/api/export/workload.csv", web::get().to(export_workload))
        .route("/api/example/judges.csv", web::get().to(example_judges_csv))
        .route("/api/example/games.csv", web::get().to(example_games_csv));
}

pub async fn start_server(config: WebConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::default());

    info!("Starting web server on http://{}", config.address());

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    fn app_state() -> web::Data<AppState> {
        web::Data::new(AppState::default())
    }

    macro_rules! init_app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(routes)).await
        };
    }

    #[actix_web::test]
    async fn test_upload_then_schedule() {
        let state = app_state();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/judges")
            .set_payload("Name,Team\nA,X\nB,\n")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::post()
            .uri("/api/games")
            .set_payload("Team,Judges_Needed\nX,1\n")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::post().uri("/api/schedule").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["assignments"][0]["Assigned Judges"], "B");
        assert_eq!(body["workload"][1]["Team"], "X");
    }

    #[actix_web::test]
    async fn test_failed_run_keeps_previous_results() {
        let state = app_state();
        let app = init_app!(state);

        let req = test::TestRequest::post().uri("/api/example").to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
        let req = test::TestRequest::post().uri("/api/schedule").to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        // every judge now conflicts with the only game
        *state.judges.lock().unwrap() = vec![Judge::new(0, "A", Some("X"))];
        *state.games.lock().unwrap() = vec![Game::new(0, "X", 1)];

        let req = test::TestRequest::post().uri("/api/schedule").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::get().uri("/api/assignments").to_request();
        let rows: Vec<AssignmentRow> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rows.len(), 9);
    }

    #[actix_web::test]
    async fn test_new_run_replaces_both_reports_together() {
        let state = app_state();
        let app = init_app!(state);

        let req = test::TestRequest::post().uri("/api/example").to_request();
        test::call_service(&app, req).await;
        let req = test::TestRequest::post().uri("/api/schedule").to_request();
        test::call_service(&app, req).await;

        *state.judges.lock().unwrap() = vec![Judge::new(0, "A", None), Judge::new(1, "B", Some("X"))];
        *state.games.lock().unwrap() = vec![Game::new(0, "X", 1)];
        let req = test::TestRequest::post().uri("/api/schedule").to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        {
            let results = state.results.lock().unwrap();
            let results = results.as_ref().expect("results stored");
            assert_eq!(results.assignments.len(), 1);
            assert_eq!(results.assignments[0].judges, "A");
            assert_eq!(results.workload.len(), 2);
            assert_eq!(results.workload[0].name, "A");
        }

        let req = test::TestRequest::post().uri("/api/example").to_request();
        test::call_service(&app, req).await;
        assert!(state.results.lock().unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_bad_upload_is_rejected() {
        let state = app_state();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/games")
            .set_payload("Team,Judges_Needed\n")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(state.games.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_summary_and_missing_results() {
        let state = app_state();
        let app = init_app!(state);

        let req = test::TestRequest::post().uri("/api/example").to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/api/summary").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["judges"], 10);
        assert_eq!(body["games"], 9);
        assert_eq!(body["total_assignments_needed"], 15);

        let req = test::TestRequest::get().uri("/api/export/workload.csv").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_csv_downloads() {
        let state = app_state();
        let app = init_app!(state);

        let req = test::TestRequest::get().uri("/api/example/games.csv").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert!(body.starts_with(b"Team,Judges_Needed\nKozara,1\n"));

        let req = test::TestRequest::post().uri("/api/example").to_request();
        test::call_service(&app, req).await;
        let req = test::TestRequest::post().uri("/api/schedule").to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/api/export/workload.csv").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert!(body.starts_with(b"Judge,Team,Games Assigned\n"));
    }
}
