//! Duration formatting for the presentation layer

/// Format whole minutes as `MM:00`
pub fn minutes_to_duration(minutes: u32) -> String {
    format!("{:02}:00", minutes)
}

/// Format seconds as `MM:SS`
pub fn seconds_to_duration(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_to_duration() {
        assert_eq!(minutes_to_duration(25), "25:00");
        assert_eq!(minutes_to_duration(5), "05:00");
        assert_eq!(minutes_to_duration(60), "60:00");
    }

    #[test]
    fn test_seconds_to_duration() {
        assert_eq!(seconds_to_duration(1500), "25:00");
        assert_eq!(seconds_to_duration(1499), "24:59");
        assert_eq!(seconds_to_duration(61), "01:01");
        assert_eq!(seconds_to_duration(0), "00:00");
    }
}
