//! JSON-lines tracing for hosts and `completetool --trace-dir`.
//!
//! Spans from the controller (`process_input`, `install_completion`,
//! `pointer_down`, `text_changed`) land in `autocomplete-trace.jsonl` inside
//! the given directory. `RUST_LOG` overrides the default filter. Needs the
//! `trace` feature; without it [`init_tracing`] reports
//! [`TraceInitError::Disabled`].

use std::path::{Path, PathBuf};

pub const TRACE_FILE_NAME: &str = "autocomplete-trace.jsonl";

#[cfg(feature = "trace")]
const DEFAULT_FILTER: &str = "ac_session=debug,ac_core=debug";

#[derive(Debug, thiserror::Error)]
pub enum TraceInitError {
    #[error("cannot create trace directory {path}: {source}")]
    Dir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadySet,
    #[error("tracing support is not compiled in (enable the `trace` feature)")]
    Disabled,
}

/// Keeps the background writer alive. Dropping it flushes buffered lines,
/// so hold it for as long as tracing should run.
#[must_use = "dropping the guard stops writing the trace file"]
pub struct TraceGuard {
    path: PathBuf,
    #[cfg(feature = "trace")]
    _worker: tracing_appender::non_blocking::WorkerGuard,
}

impl TraceGuard {
    /// The trace file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Install the global JSON subscriber writing under `log_dir`, creating the
/// directory if needed.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> Result<TraceGuard, TraceInitError> {
    std::fs::create_dir_all(log_dir).map_err(|source| TraceInitError::Dir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(log_dir, TRACE_FILE_NAME);
    let (non_blocking, worker) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .with_target(true)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER)),
        )
        .try_init()
        .map_err(|_| TraceInitError::AlreadySet)?;

    let path = log_dir.join(TRACE_FILE_NAME);
    tracing::debug!(path = %path.display(), "tracing initialised");
    Ok(TraceGuard {
        path,
        _worker: worker,
    })
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) -> Result<TraceGuard, TraceInitError> {
    Err(TraceInitError::Disabled)
}
