//! Global Constants
//!
//! Centralized defaults for configuration and tuning.

/// Network constants
pub mod network {
    /// Default collaborator request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default bind host for the HTTP server
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default bind port for the HTTP server
    pub const DEFAULT_PORT: u16 = 5000;
}

/// HTTP API routes
pub mod api {
    pub const GENERATE_PATH: &str = "/api/quiz/generate";
}

/// Quiz shape constants
pub mod quiz {
    /// Questions requested when the caller does not say
    pub const DEFAULT_QUESTIONS: usize = 15;

    /// Upper bound on questions per request
    pub const MAX_QUESTIONS: usize = 50;

    pub const DEFAULT_LANGUAGE: &str = "English";

    /// Options every question must carry
    pub const OPTION_COUNT: usize = 4;
}

/// Gemini (Generative Language API) constants
pub mod gemini {
    pub const PROVIDER_NAME: &str = "gemini";

    pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

    pub const API_KEY_HEADER: &str = "x-goog-api-key";

    /// Environment variable consulted when no key is configured
    pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

    pub const DEFAULT_TEMPERATURE: f32 = 0.5;

    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;
}

/// Terminal player constants
pub mod player {
    /// Pause after an answer so the feedback colours are visible (milliseconds)
    pub const FEEDBACK_DELAY_MS: u64 = 700;

    /// Width of the results progress bar (characters)
    pub const PROGRESS_BAR_WIDTH: usize = 30;
}
