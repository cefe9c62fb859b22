//! Time label formatting

/// Format whole seconds as `HH:MM:SS`
///
/// Every part is zero padded to two digits. Hours are not capped, so very
/// long media renders as e.g. `100:00:00`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
