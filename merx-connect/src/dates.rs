use chrono::{Months, Utc};

/// Today's date as YYYY-MM-DD (UTC)
pub fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// The date `months` months before today, YYYY-MM-DD (UTC)
pub fn months_ago(months: u32) -> String {
    let today = Utc::now().date_naive();
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_format() {
        let date = today();
        assert_eq!(date.len(), 10);
        assert_eq!(date.as_bytes()[4], b'-');
        assert_eq!(date.as_bytes()[7], b'-');
    }

    #[test]
    fn test_months_ago_is_before_today() {
        assert!(months_ago(12) < today());
        assert_eq!(months_ago(0), today());
    }
}
