use crate::html;
use crate::kpi::Kpis;
use crate::loader::{Dataset, DatasetCache};
use crate::pages::{self, logs, model, Selection, ATTACK_TYPE_FIELD};
use crate::view::Page;
use actix_web::{error::BlockingError, get, http::StatusCode, web, HttpResponse, Responder};
use std::fs;
use std::io;
use std::sync::Arc;
use tracing::{error, warn};

/// Shared across workers; the dataset cache is the only state.
pub struct AppState {
    pub cache: DatasetCache,
}

impl AppState {
    pub fn new(cache: DatasetCache) -> Self {
        AppState { cache }
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(overview)
        .service(kpi_overview)
        .service(logs_explorer)
        .service(model_performance)
        .service(state_trends)
        .service(statistics)
        .service(feature_image)
        .service(api_kpis);
}

fn page_response(page: &Page, active: &str) -> HttpResponse {
    if !page.warnings().is_empty() {
        warn!(page = active, warnings = ?page.warnings(), "page rendered with warnings");
    }
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html::render(page, active))
}

fn blocking_failed(e: BlockingError) -> HttpResponse {
    error!(error = %e, "blocking task failed");
    HttpResponse::InternalServerError().finish()
}

/// Loads the cached dataset and renders `render` over it on the blocking
/// pool, or a warning page when it could not be loaded.
async fn with_dataset<F>(
    state: web::Data<AppState>,
    title: &'static str,
    active: &str,
    render: F,
) -> HttpResponse
where
    F: FnOnce(&Arc<Dataset>) -> Page + Send + 'static,
{
    let rendered = web::block(move || match state.cache.get() {
        Ok(data) => render(&data),
        Err(e) => pages::unavailable(title, &e),
    })
    .await;
    match rendered {
        Ok(page) => page_response(&page, active),
        Err(e) => blocking_failed(e),
    }
}

#[get("/")]
async fn overview(state: web::Data<AppState>) -> impl Responder {
    with_dataset(state, pages::overview::TITLE, "/", |d| pages::overview::render(d)).await
}

#[get("/kpi")]
async fn kpi_overview(state: web::Data<AppState>) -> impl Responder {
    with_dataset(state, pages::kpi_overview::TITLE, "/kpi", |d| {
        pages::kpi_overview::render(d)
    })
    .await
}

#[derive(serde::Deserialize)]
struct LogsQuery {
    #[serde(default)]
    ip: String,
}

#[get("/logs")]
async fn logs_explorer(state: web::Data<AppState>, query: web::Query<LogsQuery>) -> impl Responder {
    let dir = state.cache.dir().to_path_buf();
    let ip = query.into_inner().ip;
    match web::block(move || logs::render(&logs::load(&dir), &ip)).await {
        Ok(page) => page_response(&page, "/logs"),
        Err(e) => blocking_failed(e),
    }
}

#[get("/model")]
async fn model_performance(state: web::Data<AppState>) -> impl Responder {
    let dir = state.cache.dir().to_path_buf();
    match web::block(move || model::render(&model::ModelInputs::load(&dir))).await {
        Ok(page) => page_response(&page, "/model"),
        Err(e) => blocking_failed(e),
    }
}

#[get("/state")]
async fn state_trends(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> impl Responder {
    let selection = Selection::from_query(&query, ATTACK_TYPE_FIELD);
    with_dataset(state, pages::state::TITLE, "/state", move |d| {
        pages::state::render(d, &selection)
    })
    .await
}

#[get("/statistics")]
async fn statistics(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> impl Responder {
    let selection = Selection::from_query(&query, ATTACK_TYPE_FIELD);
    with_dataset(state, pages::statistics::TITLE, "/statistics", move |d| {
        pages::statistics::render(d, &selection)
    })
    .await
}

#[get("/assets/feature_importance.png")]
async fn feature_image(state: web::Data<AppState>) -> impl Responder {
    let path = state.cache.dir().join(model::FEATURE_IMAGE_FILE);
    match web::block(move || fs::read(path)).await {
        Ok(Ok(bytes)) => HttpResponse::Ok().content_type("image/png").body(bytes),
        Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => HttpResponse::NotFound().finish(),
        Ok(Err(e)) => HttpResponse::InternalServerError().body(e.to_string()),
        Err(e) => blocking_failed(e),
    }
}

#[get("/api/kpis")]
async fn api_kpis(state: web::Data<AppState>) -> impl Responder {
    let report = web::block(move || {
        state
            .cache
            .get()
            .map(|data| Kpis::compute(&data.events, &data.summary).report())
    })
    .await;
    match report {
        Ok(Ok(report)) => HttpResponse::Ok().json(report),
        Ok(Err(e)) => HttpResponse::build(StatusCode::SERVICE_UNAVAILABLE)
            .json(serde_json::json!({ "error": e.to_string() })),
        Err(e) => blocking_failed(e),
    }
}
