use crate::cli::ServeArgs;
use crate::infra::{load_roster, AppState, InMemoryBillingRepository, InMemoryCreatorRepository};
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use creator_match::billing::BillingService;
use creator_match::config::AppConfig;
use creator_match::error::AppError;
use creator_match::matching::MatchService;
use creator_match::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let creators = load_roster(config.roster.path.as_deref())?;
    let match_service = Arc::new(MatchService::new(
        Arc::new(InMemoryCreatorRepository::new(creators)),
        config.matching.clone(),
    ));
    let billing_service = Arc::new(BillingService::new(
        Arc::new(InMemoryBillingRepository::default()),
        config.billing,
    ));

    let app = with_marketplace_routes(match_service, billing_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, gst_rate = config.billing.gst_rate, "creator match api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
