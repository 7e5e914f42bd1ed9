//! Clock-style duration formatting

/// Render a whole number of minutes as `MM:00`
pub fn minutes_to_duration(minutes: u32) -> String {
    format!("{:02}:00", minutes)
}

/// Render a number of seconds as `MM:SS`
pub fn seconds_to_duration(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
