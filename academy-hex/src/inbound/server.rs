//! HTTP Server configuration and startup.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use academy_types::{MentorRepository, PaymentGateway, SmsNotifier};

use super::handlers::{self, AppState};
use super::rate_limit::{PRUNE_INTERVAL, RateLimiterState, rate_limit_middleware};
use crate::openapi::ApiDoc;
use crate::{MentorService, PaymentService, SignupService};

/// HTTP Server for the academy API.
pub struct HttpServer<G: PaymentGateway, R: MentorRepository, N: SmsNotifier> {
    state: Arc<AppState<G, R, N>>,
    rate_limiter: Arc<RateLimiterState>,
    requests_per_minute: u32,
    trust_proxy: bool,
    allowed_origins: Vec<String>,
}

impl<G: PaymentGateway, R: MentorRepository, N: SmsNotifier> HttpServer<G, R, N> {
    /// Creates a new HTTP server with the given services.
    pub fn new(
        payments: PaymentService<G>,
        mentors: MentorService<R>,
        signups: SignupService<N>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                payments,
                mentors,
                signups,
            }),
            rate_limiter: Arc::new(RateLimiterState::default()), // 100 req/min default
            requests_per_minute: 100,
            trust_proxy: false,
            allowed_origins: Vec::new(),
        }
    }

    /// Replaces the default rate limit.
    pub fn with_rate_limit(mut self, requests_per_minute: u32) -> Self {
        self.requests_per_minute = requests_per_minute;
        self.rebuild_rate_limiter();
        self
    }

    /// Keys the rate limit on `X-Forwarded-For` / `X-Real-IP` instead of the
    /// peer address. Only enable behind a reverse proxy that sets them.
    pub fn with_trusted_proxy(mut self, trust: bool) -> Self {
        self.trust_proxy = trust;
        self.rebuild_rate_limiter();
        self
    }

    fn rebuild_rate_limiter(&mut self) {
        self.rate_limiter = Arc::new(
            RateLimiterState::new(self.requests_per_minute, Duration::from_secs(60))
                .trust_forwarded(self.trust_proxy),
        );
    }

    /// Restricts CORS to the given origins. An empty list allows any origin.
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        let allow_origin = if origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/", get(handlers::index::<G, R, N>))
            .route("/health", get(handlers::health))
            .route("/create-order", post(handlers::create_order::<G, R, N>))
            .route("/verify", post(handlers::verify_payment::<G, R, N>))
            .route("/api/mentors", get(handlers::list_mentors::<G, R, N>))
            .route("/api/signup", post(handlers::signup::<G, R, N>))
            .layer(metrics)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(self.cors_layer())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        let limiter = self.rate_limiter.clone();
        let pruner = tokio::spawn(async move {
            let mut tick = tokio::time::interval(PRUNE_INTERVAL);
            loop {
                tick.tick().await;
                limiter.prune();
            }
        });

        axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        pruner.abort();

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
