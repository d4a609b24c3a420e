use std::error::Error;
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber and forwards `log` records (actix-web's
/// request logger) into it.
pub fn init_tracing() -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_line_number(true)
        .finish();

    LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
