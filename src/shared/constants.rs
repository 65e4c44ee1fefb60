pub const APP_NAME: &str = "framesight";

pub const ERROR_LOG_FILE: &str = "error.log";
pub const DEBUG_LOG_FILE: &str = "debug.log";

// Original experiment wrote frames as frame%d.jpg into the working directory.
pub const FRAME_FILE_PREFIX: &str = "frame";
pub const DEFAULT_IMAGE_FORMAT: &str = "jpg";

// Preview pacing: one frame every 25ms unless overridden.
pub const DEFAULT_PREVIEW_DELAY_MS: u64 = 25;
pub const PREVIEW_WINDOW_TITLE: &str = "Frame";

// Response table layout: the subject's place answer lives in column 2.
pub const RESPONSE_LABEL_COLUMN: usize = 2;
pub const DESCRIPTOR_COLUMNS: usize = 8;

pub const CHART_FACTOR_LABELS: &[&str] = &["Blend", "Clutter", "Edge", "Total"];
pub const CHART_DISTANCE_LABELS: &[&str] = &["Closest", "Close", "Medium", "Far"];

pub const PIE_CHART_FILE: &str = "correctness_pie.png";
pub const FACTOR_CHART_FILE: &str = "factor_bars.png";
pub const DISTANCE_CHART_FILE: &str = "distance_bars.png";

// Chart palette carried over from the experiment's report figures.
pub const COLOR_CORRECT: (u8, u8, u8) = (0x19, 0xC6, 0x1F);
pub const COLOR_INCORRECT: (u8, u8, u8) = (0xF5, 0x38, 0x0F);
pub const COLOR_FACTOR_BAR: (u8, u8, u8) = (0x00, 0x00, 0x00);
pub const COLOR_FACTOR_TOTAL_BAR: (u8, u8, u8) = (0x00, 0xFF, 0xFF);
pub const COLOR_DISTANCE_BAR: (u8, u8, u8) = (0x1F, 0x77, 0xB4);
