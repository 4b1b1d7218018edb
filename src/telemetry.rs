//! Log subscriber installation for the service binaries.

use tracing::Level;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::FmtSubscriber;

/// Installs a formatted stdout subscriber capped at `level`.
///
/// # Errors
///
/// Returns [`SetGlobalDefaultError`] when a global subscriber is already set.
pub fn init(level: Level) -> Result<(), SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
}
