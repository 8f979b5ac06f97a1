use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: database.sqlite
pub static DATABASE_PATH: Lazy<String> =
    Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "database.sqlite".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Log level for both terminal and file output
/// Read from LOG_LEVEL environment variable (error, warn, info, debug, trace)
/// Default: info
pub static LOG_LEVEL: Lazy<String> = Lazy::new(|| env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API server URL (local telegram-bot-api)
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// What the router does with handler failures: "log" or "discard"
/// Read from HANDLER_ERRORS environment variable
/// Default: log
pub static HANDLER_ERRORS: Lazy<String> =
    Lazy::new(|| env::var("HANDLER_ERRORS").unwrap_or_else(|_| "log".to_string()));

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Prayer-time source configuration
pub mod prayer {
    use once_cell::sync::Lazy;
    use std::env;

    /// Which source computes schedules: "aladhan" (HTTP API) or "local" (offline calculation)
    /// Read from PRAYER_SOURCE environment variable
    /// Default: aladhan
    pub static SOURCE: Lazy<String> = Lazy::new(|| env::var("PRAYER_SOURCE").unwrap_or_else(|_| "aladhan".to_string()));

    /// Base URL of the Aladhan timings API
    pub static ALADHAN_BASE_URL: Lazy<String> =
        Lazy::new(|| env::var("ALADHAN_BASE_URL").unwrap_or_else(|_| "https://api.aladhan.com".to_string()));

    /// Aladhan calculation method id (3 = Muslim World League)
    pub static ALADHAN_METHOD: Lazy<u8> = Lazy::new(|| {
        env::var("ALADHAN_METHOD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3)
    });
}

/// Prayer-time cache configuration
pub mod cache {
    use super::Duration;

    /// Maximum number of cached schedules
    pub const MAX_ENTRIES: u64 = 10_000;

    /// Schedules are keyed by date, so a day is the longest useful lifetime
    pub const TTL_SECS: u64 = 24 * 60 * 60;

    /// Cache time-to-live duration
    pub fn ttl() -> Duration {
        Duration::from_secs(TTL_SECS)
    }
}

/// Card rendering configuration
pub mod render {
    use once_cell::sync::Lazy;
    use std::env;
    use std::path::PathBuf;

    /// Explicit font file for the prayer-time card
    /// Read from FONT_PATH environment variable
    pub static FONT_PATH: Lazy<Option<String>> = Lazy::new(|| env::var("FONT_PATH").ok());

    /// Sans-serif fonts tried in order when FONT_PATH is not set
    pub const FONT_CANDIDATES: &[&str] = &[
        "C:\\Windows\\Fonts\\bahnschrift.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
    ];

    /// Fonts consulted for characters the main font lacks (the schedule icons)
    /// Read from FONT_FALLBACK_PATHS, a platform path list (`:` or `;` separated)
    pub static FONT_FALLBACK_PATHS: Lazy<Option<Vec<PathBuf>>> = Lazy::new(|| {
        env::var_os("FONT_FALLBACK_PATHS")
            .map(|paths| env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()).collect())
    });

    /// Outline emoji/symbol fonts tried when FONT_FALLBACK_PATHS is not set.
    /// Bitmap-only colour fonts (Noto Color Emoji, Apple Color Emoji) have no outlines to draw.
    pub const FALLBACK_FONT_CANDIDATES: &[&str] = &[
        "C:\\Windows\\Fonts\\seguiemj.ttf",
        "C:\\Windows\\Fonts\\seguisym.ttf",
        "/usr/share/fonts/truetype/noto/NotoEmoji-Regular.ttf",
        "/usr/share/fonts/noto/NotoEmoji-Regular.ttf",
        "/usr/share/fonts/google-noto-emoji/NotoEmoji-Regular.ttf",
        "/usr/share/fonts/truetype/ancient-scripts/Symbola_hint.ttf",
        "/usr/share/fonts/TTF/Symbola.ttf",
        "/usr/share/fonts/gdouros-symbola/Symbola.ttf",
    ];
}
