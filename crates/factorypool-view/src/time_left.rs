pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Human label for the time remaining before a deadline.
///
/// `"Ended"` once nothing remains. Otherwise the two largest non-zero units of
/// days, hours and minutes: `"2d 5h"`, `"2d 5m"`, `"3h 12m"`, `"7m"`, `"2d"`.
/// Seconds are never shown, so the final minute reads `"0m"`.
pub fn format_time_left(seconds_remaining: i64) -> String {
    if seconds_remaining <= 0 {
        return "Ended".to_string();
    }

    let days = seconds_remaining / SECONDS_PER_DAY;
    let hours = (seconds_remaining % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (seconds_remaining % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

    match (days, hours, minutes) {
        (0, 0, m) => format!("{}m", m),
        (0, h, 0) => format!("{}h", h),
        (0, h, m) => format!("{}h {}m", h, m),
        (d, 0, 0) => format!("{}d", d),
        (d, 0, m) => format!("{}d {}m", d, m),
        (d, h, _) => format!("{}d {}h", d, h),
    }
}
