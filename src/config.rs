//! Application-level configuration constants.

// Countdown defaults
pub const DEFAULT_TITLE: &str = "Bharath + Vaish 💍";
pub const DEFAULT_TARGET_ISO: &str = "2025-08-30T18:45:00";

// Query / form limits
pub const TITLE_MIN_CHARS: usize = 1;
pub const TITLE_MAX_CHARS: usize = 60;
pub const TITLE_PARAM: &str = "title";
pub const DATE_PARAM: &str = "date";
pub const DATE_PLACEHOLDER: &str = "2025-08-30T00:00:00";
pub const FORM_ERROR_MESSAGE: &str =
    "Please provide a valid title and an ISO datetime like 2025-08-30T00:00:00";

// Refresh loop
pub const FRAME_THROTTLE_MS: f64 = 8.0;

// Unit sizes in milliseconds
pub const MS_PER_SECOND: u64 = 1_000;
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

// Celebration
pub const CELEBRATION_HEADLINE: &str = "THE DAY IS HERE!";
pub const CONFETTI_PIECES: usize = 120;
pub const CONFETTI_MAX_LEAD_PCT: f64 = 20.0;
pub const CONFETTI_ROTATION_STEP_DEG: usize = 57;
pub const CONFETTI_COLORS: [&str; 6] = [
    "#F59E0B", "#10B981", "#3B82F6", "#EC4899", "#F97316", "#84CC16",
];
/// Delay before the overlay flips to fully opaque, so the fade transition runs.
pub const OVERLAY_FADE_DELAY_MS: u32 = 16;

// Static assets (relative to the deploy base path)
pub const BACKGROUND_IMAGE: &str = "assets/background.svg";
