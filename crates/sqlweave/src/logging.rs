//! `tracing` events for compilation and execution.
//!
//! Targets:
//! - `sqlweave.compile`: one `debug` event per compilation (or failure).
//! - `sqlweave.sql`: one event per executed statement, at the configured level.
//!
//! Without the `tracing` feature every function here is a no-op.

use crate::compiler::Compiled;
use crate::config::LogOptions;
use crate::dialect::Vendor;
use crate::error::SqlError;

/// Cut `sql` to at most `max_bytes`, on a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

pub(crate) fn truncate_sql(sql: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
        _ => sql.to_string(),
    }
}

pub(crate) fn log_compiled(compiled: &Compiled) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "sqlweave.compile",
        vendor = %compiled.vendor,
        param_count = compiled.params.len(),
        raw_fragments = compiled.raw_fragments,
        sql = %compiled.sql,
        "compiled statement"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = compiled;
}

pub(crate) fn log_compile_error(vendor: Vendor, err: &SqlError) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "sqlweave.compile",
        vendor = %vendor,
        error = %err,
        "compilation failed"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = (vendor, err);
}

/// Emitted before a compiled statement is handed to a driver.
pub(crate) fn log_execution(compiled: &Compiled, options: &LogOptions) {
    #[cfg(feature = "tracing")]
    {
        use tracing::Level;

        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let sql = truncate_sql(&compiled.sql, options.max_sql_length);
        emit_at_level!(
            Level::from(options.level),
            target: "sqlweave.sql",
            vendor = %compiled.vendor,
            param_count = compiled.params.len(),
            sql = %sql,
        );
    }
    #[cfg(not(feature = "tracing"))]
    let _ = (compiled, options);
}

/// UPDATE/DELETE without WHERE under the `Warn` policy.
pub(crate) fn warn_unfiltered_dml(verb: &str, table: &str) {
    #[cfg(feature = "tracing")]
    tracing::warn!(
        target: "sqlweave.compile",
        statement = verb,
        table,
        "statement without WHERE affects every row"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = (verb, table);
}
