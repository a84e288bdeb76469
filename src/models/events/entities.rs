use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 校园活动
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn validate_event_window(start_at: DateTime<Utc>, end_at: Option<DateTime<Utc>>) -> Result<(), String> {
    match end_at {
        Some(end) if end < start_at => Err("end_at must not be before start_at".to_string()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_event_window() {
        let now = Utc::now();
        assert!(validate_event_window(now, None).is_ok());
        assert!(validate_event_window(now, Some(now)).is_ok());
        assert!(validate_event_window(now, Some(now + Duration::hours(2))).is_ok());
        assert!(validate_event_window(now, Some(now - Duration::hours(2))).is_err());
    }
}
