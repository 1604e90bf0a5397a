//! Diagnostic logging.
//!
//! The terminal UI owns stdout and stderr, so events are only recorded when a
//! log file is configured. `RUST_LOG` selects the filter, `info` by default.

use {
  super::*,
  std::fs::OpenOptions,
  tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
  },
};

pub(crate) fn init(log_file: Option<&Path>) -> Result {
  let Some(path) = log_file else {
    return Ok(());
  };

  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("could not open log file `{}`", path.display()))?;

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
    .try_init()
    .context("could not install log subscriber")?;

  Ok(())
}
