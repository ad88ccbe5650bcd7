use crate::cli::ServeArgs;
use crate::infra::{AppState, TesseractCli};
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use labelscan::config::AppConfig;
use labelscan::error::AppError;
use labelscan::lexicon::LexiconStore;
use labelscan::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    // The lexicon must be complete before the first request; a load
    // failure here aborts start-up instead of serving partial data.
    let store = Arc::new(LexiconStore::load(
        &config.lexicon.alias_file,
        &config.lexicon.hazard_file,
    )?);
    info!(
        records = store.record_count(),
        aliases = store.alias_count(),
        "hazard lexicon loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        store,
        extractor: Arc::new(TesseractCli::default()),
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "ingredient analysis service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
