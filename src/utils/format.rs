//! Display formatting helpers

/// Render remaining milliseconds as `MM:SS`.
///
/// Partial seconds are truncated. Minutes are not wrapped into hours.
pub fn format_remaining(remaining_ms: u64) -> String {
    let total_seconds = remaining_ms / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
