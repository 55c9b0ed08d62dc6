use actix_web::{web, App, HttpServer};
use security_dash::config::Config;
use security_dash::loader::DatasetCache;
use security_dash::server::{self, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("security_dash=info,actix_web=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::load();
    init_logging();

    let cache = DatasetCache::new(&config.data_dir);
    // warm the cache so a broken data dir shows up in the log at startup
    if let Err(e) = cache.get() {
        warn!(error = %e, "dataset not available yet; pages will show a warning");
    }
    let state = web::Data::new(AppState::new(cache));

    info!(
        bind = %config.bind,
        port = config.port,
        data_dir = %config.data_dir.display(),
        "starting security dashboard"
    );
    HttpServer::new(move || App::new().app_data(state.clone()).configure(server::routes))
        .workers(config.workers.max(1))
        .bind((config.bind.as_str(), config.port))?
        .run()
        .await
}
