//! User-facing diagnostics and logger setup.
//!
//! Notices for the user are printed to stderr with an `ERROR:`/`WARN:` prefix,
//! independent of the log level. Internal progress goes through `log`.

use crate::error::ItemError;

/// Initialize `env_logger`. `RUST_LOG` wins; otherwise `warn`, or `debug` when verbose.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Prefix a message for display as an error.
pub fn error_message(msg: impl AsRef<str>) -> String {
    format!("ERROR: {}", msg.as_ref())
}

/// Print a warning to stderr and record it in the log.
pub fn warn(msg: impl AsRef<str>) {
    let msg = msg.as_ref();
    log::warn!("{}", msg);
    eprintln!("WARN: {}", msg);
}

/// Log one per-item notice at `warn` and print it to stderr.
pub fn report_notice(notice: &ItemError) {
    log::warn!("{}", notice_log_message(notice));
    eprintln!("{}", error_message(notice.to_string()));
}

fn notice_log_message(notice: &ItemError) -> String {
    match notice {
        ItemError::MissingRequiredField { kind, index, fields } => {
            format!("{} {} skipped: missing {}", kind, index, fields.join(", "))
        }
    }
}
