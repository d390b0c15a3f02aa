//! Native log setup for hosts and test harnesses embedding the client.
//!
//! `RUST_LOG` overrides the filter; `ACCOUNTS_LOG_JSON=1` switches the
//! output to one JSON object per event.

use tracing::Subscriber;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::EnvFilter;

pub const ENV_LOG_JSON: &str = "ACCOUNTS_LOG_JSON";

/// Used when `RUST_LOG` is unset: this crate at `info`, dependencies at `warn`.
pub const DEFAULT_DIRECTIVES: &str = "warn,monad_accounts=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::from_flag(std::env::var(ENV_LOG_JSON).ok().as_deref())
    }

    fn from_flag(flag: Option<&str>) -> Self {
        match flag.map(str::trim) {
            Some("1") | Some("true") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Build (without installing) a subscriber for `format`.
///
/// `directives` of `None` means `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVES`].
pub fn subscriber<W>(format: LogFormat, directives: Option<&str>, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = match directives {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES)),
    };
    let builder = fmt::Subscriber::builder().with_env_filter(filter).with_writer(writer);
    match format {
        LogFormat::Json => Box::new(builder.json().finish()),
        LogFormat::Pretty => Box::new(builder.pretty().finish()),
    }
}

/// Install the stderr subscriber process-wide. Returns `false` when a global
/// subscriber was already set.
pub fn init_logging() -> bool {
    tracing::subscriber::set_global_default(subscriber(LogFormat::from_env(), None, std::io::stderr)).is_ok()
}
