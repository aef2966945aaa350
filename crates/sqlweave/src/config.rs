//! Compilation and logging options.

use serde::Deserialize;

/// Policy for UPDATE/DELETE statements without a WHERE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DangerousDmlPolicy {
    /// Compile as written.
    #[default]
    Allow,
    /// Compile, but emit a warning log.
    Warn,
    /// Reject with `InvalidClauseCombination`.
    Error,
}

/// Event level for SQL logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    #[default]
    Debug,
    Trace,
}

#[cfg(feature = "tracing")]
impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// SQL logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    /// Level for executed-SQL events.
    pub level: LogLevel,
    /// Truncate long SQL strings to this many bytes, cut back to a char
    /// boundary. `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: LogLevel::Debug,
            max_sql_length: Some(200),
        }
    }
}

/// Options shared by every statement spawned from one [`Query`](crate::Query).
///
/// Deserializable from any serde format, so it can live in an application's
/// config file:
///
/// ```ignore
/// let opts: CompileOptions = serde_json::from_str(r#"{"qualify_columns": false}"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Reject fields whose table is not in FROM/JOIN/CTE scope.
    pub check_scope: bool,
    /// Emit `"table"."column"`. When false, single-source statements emit bare columns.
    pub qualify_columns: bool,
    /// Enforce the unquoted identifier grammar on table and column names.
    pub validate_identifiers: bool,
    /// How DELETE without WHERE is handled.
    pub delete_without_where: DangerousDmlPolicy,
    /// How UPDATE without WHERE is handled.
    pub update_without_where: DangerousDmlPolicy,
    /// SQL logging.
    pub log: LogOptions,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            check_scope: true,
            qualify_columns: true,
            validate_identifiers: false,
            delete_without_where: DangerousDmlPolicy::Allow,
            update_without_where: DangerousDmlPolicy::Allow,
            log: LogOptions::default(),
        }
    }
}

impl CompileOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable scope checking.
    pub fn check_scope(mut self, enabled: bool) -> Self {
        self.check_scope = enabled;
        self
    }

    /// Enable or disable table-qualified column names.
    pub fn qualify_columns(mut self, enabled: bool) -> Self {
        self.qualify_columns = enabled;
        self
    }

    /// Enable or disable identifier validation.
    pub fn validate_identifiers(mut self, enabled: bool) -> Self {
        self.validate_identifiers = enabled;
        self
    }

    /// Configure how DELETE without WHERE is handled.
    pub fn delete_without_where(mut self, policy: DangerousDmlPolicy) -> Self {
        self.delete_without_where = policy;
        self
    }

    /// Configure how UPDATE without WHERE is handled.
    pub fn update_without_where(mut self, policy: DangerousDmlPolicy) -> Self {
        self.update_without_where = policy;
        self
    }

    /// Reject UPDATE and DELETE without WHERE.
    pub fn strict(mut self) -> Self {
        self.delete_without_where = DangerousDmlPolicy::Error;
        self.update_without_where = DangerousDmlPolicy::Error;
        self
    }

    /// Set the level for executed-SQL events.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log.level = level;
        self
    }

    /// Set maximum SQL length to log, in bytes.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.log.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.log.max_sql_length = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = CompileOptions::default();
        assert!(opts.check_scope);
        assert!(opts.qualify_columns);
        assert!(!opts.validate_identifiers);
        assert_eq!(opts.delete_without_where, DangerousDmlPolicy::Allow);
        assert_eq!(opts.log.max_sql_length, Some(200));
    }

    #[test]
    fn builder_methods() {
        let opts = CompileOptions::new()
            .qualify_columns(false)
            .strict()
            .log_level(LogLevel::Info)
            .no_truncate();
        assert!(!opts.qualify_columns);
        assert_eq!(opts.update_without_where, DangerousDmlPolicy::Error);
        assert_eq!(opts.log.level, LogLevel::Info);
        assert_eq!(opts.log.max_sql_length, None);
    }

    #[test]
    fn deserializes_partial_config() {
        let opts: CompileOptions = serde_json::from_str(
            r#"{"check_scope": false, "delete_without_where": "warn", "log": {"level": "trace"}}"#,
        )
        .unwrap();
        assert!(!opts.check_scope);
        assert!(opts.qualify_columns);
        assert_eq!(opts.delete_without_where, DangerousDmlPolicy::Warn);
        assert_eq!(opts.log.level, LogLevel::Trace);
        assert_eq!(opts.log.max_sql_length, Some(200));
    }
}
