use crate::env::VarEnv;

/// Variable that overrides the verbosity-derived filter.
pub const LOG_ENV_VAR: &str = "OMICS_EVENTBRIDGE_LOG";

/// Filter directive for a `-v` count, unless overridden by [`LOG_ENV_VAR`].
pub fn log_filter<E: VarEnv + ?Sized>(verbose: u8, env: &E) -> String {
    if let Some(filter) = env.var(LOG_ENV_VAR).filter(|f| !f.trim().is_empty()) {
        return filter;
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
    .to_string()
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays machine-readable.
pub fn init_tracing<E: VarEnv + ?Sized>(verbose: u8, env: &E) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, env))
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2) // Show target module for -vv and above
        .with_thread_ids(verbose >= 3) // Show thread IDs for -vvv
        .with_line_number(verbose >= 3) // Show line numbers for -vvv
        .init();
}
