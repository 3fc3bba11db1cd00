use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryConsultationRepository};
use crate::routes::with_consultation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use consult_ai::config::AppConfig;
use consult_ai::error::AppError;
use consult_ai::telemetry;
use consult_ai::workflows::consultation::ConsultationService;
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

    let repository = Arc::new(InMemoryConsultationRepository::default());
    let consultation_service = Arc::new(ConsultationService::new(
        repository,
        config.consultation,
    ));

    let app = with_consultation_routes(consultation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        include_report = config.consultation.include_report,
        "consultation triage service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
