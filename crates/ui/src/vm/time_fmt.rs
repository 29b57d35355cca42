#[must_use]
pub fn format_time_left(seconds: u32) -> String {
    format!("Time Left: {seconds}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_seconds() {
        assert_eq!(format_time_left(30), "Time Left: 30s");
        assert_eq!(format_time_left(0), "Time Left: 0s");
    }
}
