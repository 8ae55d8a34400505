//! Display string formatting

/// Format remaining seconds as `mm:ss`, both parts zero-padded to two digits
pub fn format_remaining(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
