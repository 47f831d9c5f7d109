//! Tracing subscriber setup.

use crate::config::{LogFormat, LoggingConfig};
use shepherd_error::{ConfigError, ShepherdResult};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise logging from `config`.
///
/// `RUST_LOG` overrides the configured level. With the `otel` feature, spans
/// are also exported to stdout through OpenTelemetry.
///
/// # Errors
///
/// Fails on an invalid filter directive or when a global subscriber is
/// already installed.
pub fn init_observability(config: &LoggingConfig) -> ShepherdResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level()))
        .map_err(|e| ConfigError::new(format!("Invalid log filter '{}': {}", config.level(), e)))?;

    let fmt_layer = match config.format() {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed(),
    };

    #[cfg(feature = "otel")]
    let registry = tracing_subscriber::registry().with(otel::layer(env!("CARGO_PKG_NAME")));
    #[cfg(not(feature = "otel"))]
    let registry = tracing_subscriber::registry();

    registry
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install subscriber: {}", e)))?;

    Ok(())
}

#[cfg(feature = "otel")]
mod otel {
    use opentelemetry::{KeyValue, global, trace::TracerProvider};
    use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
    use opentelemetry_stdout::SpanExporter;
    use tracing::Subscriber;
    use tracing_subscriber::{Layer, registry::LookupSpan};

    /// OpenTelemetry bridge exporting spans to stdout.
    pub(super) fn layer<S>(service_name: &'static str) -> impl Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        let resource = Resource::builder()
            .with_service_name(service_name)
            .with_attributes(vec![KeyValue::new(
                "service.version",
                env!("CARGO_PKG_VERSION"),
            )])
            .build();

        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(SpanExporter::default())
            .with_resource(resource)
            .build();

        global::set_tracer_provider(provider.clone());
        tracing_opentelemetry::layer().with_tracer(provider.tracer(service_name))
    }
}
