use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
    pub enum NotificationType {
        AssignmentCreated => "assignment_created",
        AssignmentGraded => "assignment_graded",
        ExamPublished => "exam_published",
        ExamGraded => "exam_graded",
        AttendanceAbsent => "attendance_absent",
        PtmUpdate => "ptm_update",
        Announcement => "announcement",
        Event => "event",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub content: Option<String>,
    /// 关联对象，如 ("assignment", 12)
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
