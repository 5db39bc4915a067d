/// Formats whole seconds as a m:ss clock, e.g. 120 -> "2:00".
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
