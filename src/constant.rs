/// Application name used for the configuration file location
pub const APP_NAME: &str = "side-by-side";

// Rendering defaults
pub const DEFAULT_SEPARATOR: &str = "|";
pub const DEFAULT_INSERT_BRACKETS: (&str, &str) = ("<", ">");
pub const DEFAULT_DELETE_BRACKETS: (&str, &str) = (">", "<");

/// Columns reserved for the two-character indicator prefix of every line
pub const INDICATOR_PAD: usize = 2;

/// Differ tuning: pairs of lines below this similarity are not aligned
pub const FANCY_REPLACE_CUTOFF: f32 = 0.75;

/// Sample input pair used by the demo entry points
pub const SAMPLE_LEFT: [&str; 3] = ["Hello, World\n", "안녕, 세계", "For Test! 테스트용입니다."];
pub const SAMPLE_RIGHT: [&str; 4] = [
    "Helo, Wold!\n",
    "안넝, 새개!",
    "For Test! 테스트용",
    "빈 라인",
];
