//! Centralized model names, API endpoints, and tuning defaults.

/// Default model identifiers per provider.
pub mod models {
    pub const GEMINI_DEFAULT: &str = "gemini-2.5-flash";
    pub const OPENAI_DEFAULT: &str = "gpt-4o-mini";
    pub const DEEPSEEK_DEFAULT: &str = "deepseek-chat";
}

/// Provider API base URLs.
pub mod urls {
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
    pub const DEEPSEEK_API_BASE: &str = "https://api.deepseek.com/v1";
}

/// Tuning defaults, overridable through the environment.
pub mod defaults {
    /// Upper bound on rules dispatched to a provider at the same time.
    pub const MAX_CONCURRENT_RULES: usize = 8;
    /// Per-rule remote call deadline, in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;
}
