use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use crate::algorithm::{PlanSummary, make_rng};
use crate::config::AppConfig;
use crate::error::SeatingError;
use crate::excel::{export_seating_plan, load_classrooms_excel, load_roster_excel};
use crate::models::{ClassroomSpec, Roster, Student};
use crate::session::Session;

/// Estado compartido: una sesión por proceso del servidor.
pub struct AppState {
    pub session: Mutex<Session>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        AppState { session: Mutex::new(Session::new()), config }
    }
}

#[derive(Deserialize)]
struct ClassroomInput {
    name: String,
    rows: serde_json::Value,
    cols: serde_json::Value,
}

#[derive(Deserialize)]
struct PathRequest {
    path: String,
}

#[derive(Deserialize)]
struct ExportRequest {
    path: String,
    classroom: Option<String>,
}

#[derive(Deserialize)]
struct PlanQuery {
    seed: Option<u64>,
}

#[derive(Serialize)]
struct ClassroomEntry<'a> {
    name: &'a str,
    rows: usize,
    cols: usize,
    capacity: usize,
    label: String,
}

impl<'a> From<&'a ClassroomSpec> for ClassroomEntry<'a> {
    fn from(c: &'a ClassroomSpec) -> Self {
        ClassroomEntry { name: &c.name, rows: c.rows, cols: c.cols, capacity: c.capacity(), label: c.to_string() }
    }
}

fn error_response(e: &SeatingError) -> HttpResponse {
    let body = json!({"error": e.to_string()});
    match e {
        SeatingError::ClassroomNotFound(_) => HttpResponse::NotFound().json(body),
        e if e.is_validation() => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

fn lock_session(state: &AppState) -> Result<MutexGuard<'_, Session>, HttpResponse> {
    state
        .session
        .lock()
        .map_err(|_| HttpResponse::InternalServerError().json(json!({"error": "session lock poisoned"})))
}

// Números o texto: el formulario original aceptaba ambos.
fn value_as_text(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn list_classrooms_handler(state: web::Data<AppState>) -> impl Responder {
    let session = match lock_session(&state) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let entries: Vec<ClassroomEntry> = session.classrooms().iter().map(ClassroomEntry::from).collect();
    HttpResponse::Ok().json(json!({"classrooms": entries}))
}

async fn add_classroom_handler(state: web::Data<AppState>, body: web::Json<ClassroomInput>) -> impl Responder {
    let mut session = match lock_session(&state) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let input = body.into_inner();
    match session.add_classroom_from_input(&input.name, &value_as_text(&input.rows), &value_as_text(&input.cols)) {
        Ok(spec) => HttpResponse::Created().json(ClassroomEntry::from(spec)),
        Err(e) => {
            warn!(error = %e, "add classroom rejected");
            error_response(&e)
        }
    }
}

async fn delete_classroom_handler(state: web::Data<AppState>, name: web::Path<String>) -> impl Responder {
    let mut session = match lock_session(&state) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match session.delete_classroom(&name) {
        Ok(removed) => HttpResponse::Ok().json(json!({"deleted": removed.name})),
        Err(e) => error_response(&e),
    }
}

async fn load_classrooms_handler(state: web::Data<AppState>, body: web::Json<PathRequest>) -> impl Responder {
    let specs = match load_classrooms_excel(&body.path) {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };
    let mut session = match lock_session(&state) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let loaded = session.load_classrooms(specs);
    HttpResponse::Ok().json(json!({"loaded": loaded, "total": session.classrooms().len()}))
}

async fn set_roster_handler(state: web::Data<AppState>, body: web::Json<Vec<Student>>) -> impl Responder {
    let roster = match Roster::new(body.into_inner()) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };
    let mut session = match lock_session(&state) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let count = roster.len();
    session.set_roster(roster);
    HttpResponse::Ok().json(json!({"students": count}))
}

async fn load_roster_handler(state: web::Data<AppState>, body: web::Json<PathRequest>) -> impl Responder {
    let roster = match load_roster_excel(&body.path) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };
    let mut session = match lock_session(&state) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let count = roster.len();
    session.set_roster(roster);
    HttpResponse::Ok().json(json!({"students": count}))
}

async fn plan_handler(state: web::Data<AppState>, query: web::Query<PlanQuery>) -> impl Responder {
    let mut session = match lock_session(&state) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let mut rng = make_rng(query.seed.or(state.config.seed));
    let plan = match session.plan(&mut rng) {
        Ok(p) => p.clone(),
        Err(e) => return error_response(&e),
    };
    let summary = match session.roster() {
        Some(roster) => PlanSummary::from_plan(&plan, roster),
        None => return error_response(&SeatingError::RosterNotLoaded),
    };
    HttpResponse::Ok().json(json!({"plan": plan, "summary": summary}))
}

async fn seat_handler(state: web::Data<AppState>, path: web::Path<(String, usize, usize)>) -> impl Responder {
    let (classroom, row, col) = path.into_inner();
    let session = match lock_session(&state) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match session.seat_occupant(&classroom, row, col) {
        Ok(seat) => HttpResponse::Ok().json(seat),
        Err(e) => error_response(&e),
    }
}

async fn export_handler(state: web::Data<AppState>, body: web::Json<ExportRequest>) -> impl Responder {
    let session = match lock_session(&state) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let Some(plan) = session.last_plan() else {
        return error_response(&SeatingError::NoPlan);
    };
    let to_write = match &body.classroom {
        Some(name) => match plan.only(name) {
            Some(p) => p,
            None => return error_response(&SeatingError::ClassroomNotFound(name.clone())),
        },
        None => plan.clone(),
    };
    let target = match state.config.resolve_export_path(&body.path) {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "export path rejected");
            return error_response(&e);
        }
    };
    match export_seating_plan(&to_write, &target) {
        Ok(()) => HttpResponse::Ok().json(json!({"path": target.display().to_string(), "classrooms": to_write.len()})),
        Err(e) => error_response(&e),
    }
}

async fn student_handler(state: web::Data<AppState>, enrollment: web::Path<String>) -> impl Responder {
    let session = match lock_session(&state) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match session.lookup_student(&enrollment) {
        Some(info) => HttpResponse::Ok().json(info),
        None => HttpResponse::NotFound().json(json!({"error": "student not found"})),
    }
}

async fn help_handler() -> impl Responder {
    let help = json!({
        "description": "Exam seating planner. Load a roster and classrooms, then POST /plan.",
        "routes": [
            "GET /classrooms",
            "POST /classrooms {\"name\": \"A101\", \"rows\": 5, \"cols\": 6}",
            "DELETE /classrooms/{name}",
            "POST /classrooms/load {\"path\": \"classrooms.xlsx\"}",
            "POST /roster [{\"enrollment\", \"name\", \"year\", \"branch\"}]",
            "POST /roster/load {\"path\": \"students.xlsx\"}",
            "POST /plan?seed=42",
            "GET /plan/{classroom}/seats/{row}/{col}",
            "POST /plan/export {\"path\": \"plan.xlsx\", \"classroom\": null}",
            "GET /students/{enrollment}"
        ],
        "roster_columns": crate::excel::ROSTER_COLUMNS,
        "classroom_columns": crate::excel::CLASSROOM_COLUMNS,
    });
    HttpResponse::Ok().json(help)
}

/// Tabla de rutas, compartida por `run_server` y los tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/classrooms", web::get().to(list_classrooms_handler))
        .route("/classrooms", web::post().to(add_classroom_handler))
        .route("/classrooms/load", web::post().to(load_classrooms_handler))
        .route("/classrooms/{name}", web::delete().to(delete_classroom_handler))
        .route("/roster", web::post().to(set_roster_handler))
        .route("/roster/load", web::post().to(load_roster_handler))
        .route("/plan", web::post().to(plan_handler))
        .route("/plan/export", web::post().to(export_handler))
        .route("/plan/{classroom}/seats/{row}/{col}", web::get().to(seat_handler))
        .route("/students/{enrollment}", web::get().to(student_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let bind = config.bind.clone();
    let state = web::Data::new(AppState::new(config));
    info!(%bind, "starting seatplan API");
    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(bind)?
        .run()
        .await
}
