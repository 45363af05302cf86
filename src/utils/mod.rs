pub mod build_info;

use std::{env, path::PathBuf, sync::Once};

use intake_config::Config;

const HOME_ENV: &str = "FIT_INTAKE_HOME";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber. `RUST_LOG` refines the default
/// `fit_intake=info` directive; output goes to stderr so stdout stays clean
/// for the questionnaire.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
            .add_directive("fit_intake=info".parse().unwrap_or_else(|_| LevelFilter::INFO.into()));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Returns the application data directory: `$FIT_INTAKE_HOME` when set,
/// otherwise `~/.fit_intake`.
pub fn app_data_dir() -> PathBuf {
    match env::var_os(HOME_ENV) {
        Some(custom) => PathBuf::from(custom),
        None => Config::default_data_dir(),
    }
}
