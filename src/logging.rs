use std::env::VarError;

use color_eyre::Result;
use tracing::Subscriber;
use tracing_error::ErrorLayer;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

lazy_static::lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase();
    pub static ref LOG_ENV: String = format!("{}_LOG_LEVEL", *PROJECT_NAME);
}

pub fn create_file_layer<S>(log_path: String) -> Result<impl tracing_subscriber::layer::Layer<S>>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let env_filter = EnvFilter::builder().with_default_directive(tracing::Level::INFO.into());
    // `RUST_LOG` wins if set; otherwise fall back to the crate-specific
    // level variable.
    let env_filter = env_filter
        .try_from_env()
        .or_else(|_| env_filter.with_env_var(LOG_ENV.clone()).from_env())?;
    let log_file = std::fs::File::create(log_path)?;
    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);
    Ok(file_subscriber)
}

/// Enable logging if the `LOG_FILE` environment variable is specified.
pub fn init() -> Result<()> {
    let subscriber = tracing_subscriber::registry();

    match std::env::var("LOG_FILE") {
        Ok(log_path) => with_rest(subscriber.with(create_file_layer(log_path)?)),
        Err(VarError::NotPresent) => with_rest(subscriber),
        Err(err) => Err(err.into()),
    }
}

fn with_rest<S>(subscriber: S) -> Result<()>
where
    S: Subscriber + Send + Sync + 'static + SubscriberInitExt + for<'span> LookupSpan<'span>,
{
    let subscriber = subscriber.with(ErrorLayer::default());
    subscriber.try_init()?;
    Ok(())
}
