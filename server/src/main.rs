//! Runs the calculator service.
//!
//! Configured through the environment, see [`calc_server::config`].
use calc_server::{Config, server};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    #[cfg(feature = "tracing")]
    logging::enable();

    let default_panic_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        panic_hook(panic_info);
        default_panic_hook(panic_info);
    }));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            report(&err);
            return ExitCode::FAILURE;
        }
    };

    match server::serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &calc_server::Error) {
    #[cfg(feature = "tracing")]
    tracing::error!("{err}");
    #[cfg(not(feature = "tracing"))]
    eprintln!("{err}");
}

fn panic_hook(panic_info: &std::panic::PanicHookInfo) {
    let payload = if let Some(payload) = panic_info.payload().downcast_ref::<&str>() {
        Some(&**payload)
    } else if let Some(payload) = panic_info.payload().downcast_ref::<String>() {
        Some(payload.as_str())
    } else {
        None
    };

    let location = panic_info.location().map(|location| location.to_string());
    #[cfg(feature = "tracing")]
    tracing::error!("calc server panicked at {location:?}: {payload:?}");
    #[cfg(not(feature = "tracing"))]
    let _ = (location, payload);
}

#[cfg(feature = "tracing")]
mod logging {
    use std::io;
    use tracing_subscriber::{
        EnvFilter, Registry,
        fmt::{self, time::UtcTime},
        prelude::*,
    };

    /// Enable logging.
    pub fn enable() {
        let console_logger = fmt::layer()
            .with_writer(io::stdout)
            .with_timer(UtcTime::rfc_3339())
            .pretty();

        let subscriber = Registry::default()
            .with(EnvFilter::from_default_env())
            .with(console_logger);

        tracing::subscriber::set_global_default(subscriber)
            .expect("global logger should only be set once");
    }
}
