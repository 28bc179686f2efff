use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::application::manifest::{METRIC_FETCH_FAILURE, METRIC_MANIFEST_FETCH};
use crate::application::posts::{METRIC_POST_CACHE_HIT, METRIC_POST_CACHE_MISS, METRIC_POST_FETCH};
use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
///
/// Logs go to stderr so the page dump on stdout stays clean.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            METRIC_MANIFEST_FETCH,
            Unit::Count,
            "Total number of manifest fetches issued."
        );
        describe_counter!(
            METRIC_POST_FETCH,
            Unit::Count,
            "Total number of post body fetches issued."
        );
        describe_counter!(
            METRIC_POST_CACHE_HIT,
            Unit::Count,
            "Total number of post opens served from the post cache."
        );
        describe_counter!(
            METRIC_POST_CACHE_MISS,
            Unit::Count,
            "Total number of post opens that required a fetch."
        );
        describe_counter!(
            METRIC_FETCH_FAILURE,
            Unit::Count,
            "Total number of failed fetches, labelled by resource kind."
        );
    });
}
