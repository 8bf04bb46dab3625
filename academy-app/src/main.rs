//! # Academy Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the mentor repository (and seed it when asked)
//! - Build the Razorpay and Fast2SMS adapters
//! - Create the services and start the HTTP server

mod config;
mod seed;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use academy_gateways::{Fast2SmsNotifier, RazorpayGateway};
use academy_hex::{MentorService, PaymentService, SignupService, inbound::HttpServer};
use academy_repo::build_repo;

const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("academy-backend"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // OpenTelemetry export only when a collector is configured
    let otel = if std::env::var_os(OTLP_ENDPOINT_VAR).is_some() {
        Some(init_tracer()?)
    } else {
        None
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,academy_app=debug,academy_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting academy server on port {}", config.port);
    tracing::info!("Academy: {}", config.academy_name);

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    if let Some(path) = &config.mentors_seed_path {
        let inserted = seed::seed_from_file(&repo, path).await?;
        tracing::info!("Mentor seed from {}: {} inserted", path, inserted);
    }

    // Outbound adapters
    let key_secret = config.razorpay.key_secret.clone();
    let gateway = RazorpayGateway::new(config.razorpay);
    let notifier = Fast2SmsNotifier::new(config.fast2sms);

    // Create the services
    let payments = PaymentService::new(gateway, key_secret);
    let mentors = MentorService::new(repo);
    let signups = SignupService::new(notifier, config.academy_name);

    // Create and run the HTTP server
    let server = HttpServer::new(payments, mentors, signups)
        .with_rate_limit(config.rate_limit_per_minute)
        .with_trusted_proxy(config.trust_proxy_headers)
        .with_allowed_origins(config.cors_allowed_origins);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}
