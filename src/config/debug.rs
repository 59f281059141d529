//! Debugging feature flags.

pub struct LogFlags {
    /// Log every settings write to storage
    pub log_settings_store: bool,

    /// Log accepted / rejected image inputs
    pub log_image_input: bool,

    /// Dump the outgoing instruction text before each request
    pub log_prompt: bool,

    /// Log the raw model text before parsing
    pub log_raw_response: bool,

    /// Anything about session state transitions
    pub log_session: bool,

    /// Warn when a request takes longer than `slow_request_ms`
    pub log_performance: bool,
    pub slow_request_ms: u128,
}

pub const DF: LogFlags = LogFlags {
    log_settings_store: false,
    log_image_input: true,
    log_prompt: false,
    log_raw_response: false,
    log_session: true,

    log_performance: true,
    slow_request_ms: 30_000,
};
