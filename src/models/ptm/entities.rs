use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/ptm.ts")]
    pub enum PtmStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        RescheduleRequested => "reschedule_requested",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/ptm.ts")]
    pub enum PtmAction {
        Approve => "approve",
        Reject => "reject",
        Reschedule => "reschedule",
        Complete => "complete",
        Accept => "accept",
        Decline => "decline",
        Cancel => "cancel",
    }
}

/// 发起状态变更的一方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PtmActor {
    Teacher,
    Parent,
}

impl PtmStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PtmStatus::Completed | PtmStatus::Rejected | PtmStatus::Cancelled
        )
    }

    /// 状态机：返回动作执行后的状态，不允许时返回 None
    pub fn apply(&self, action: PtmAction, actor: PtmActor) -> Option<PtmStatus> {
        use PtmAction::*;
        use PtmStatus::*;
        match (actor, *self, action) {
            (PtmActor::Teacher, Pending, Approve) => Some(Approved),
            (PtmActor::Teacher, Pending, Reject) => Some(Rejected),
            (PtmActor::Teacher, Pending | Approved, Reschedule) => Some(RescheduleRequested),
            (PtmActor::Teacher, Approved, Complete) => Some(Completed),
            (PtmActor::Parent, RescheduleRequested, Accept) => Some(Approved),
            (PtmActor::Parent, RescheduleRequested, Decline) => Some(Rejected),
            (PtmActor::Parent, Pending | Approved | RescheduleRequested, Cancel) => Some(Cancelled),
            _ => None,
        }
    }
}

/// 家长会预约
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ptm.ts")]
pub struct PtmBooking {
    pub id: i64,
    pub parent_id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub agenda: Option<String>,
    pub status: PtmStatus,
    /// 教师提议的新时间
    pub proposed_at: Option<DateTime<Utc>>,
    pub teacher_note: Option<String>,
    pub parent_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PtmBooking {
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.scheduled_at + Duration::minutes(self.duration_minutes as i64)
    }

    /// 与另一预约的时间段是否重叠（半开区间）
    pub fn overlaps(&self, start: DateTime<Utc>, duration_minutes: i32) -> bool {
        let end = start + Duration::minutes(duration_minutes as i64);
        self.scheduled_at < end && start < self.ends_at()
    }
}

/// 在教师已批准的预约中查找与给定时段重叠者
pub fn find_overlap<'a>(
    approved: &'a [PtmBooking],
    exclude_id: i64,
    start: DateTime<Utc>,
    duration_minutes: i32,
) -> Option<&'a PtmBooking> {
    approved.iter().find(|b| {
        b.id != exclude_id && b.status == PtmStatus::Approved && b.overlaps(start, duration_minutes)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use PtmAction::*;
    use PtmStatus::*;

    #[test]
    fn test_teacher_transitions() {
        let t = PtmActor::Teacher;
        assert_eq!(Pending.apply(Approve, t), Some(Approved));
        assert_eq!(Pending.apply(Reject, t), Some(Rejected));
        assert_eq!(Pending.apply(Reschedule, t), Some(RescheduleRequested));
        assert_eq!(Approved.apply(Reschedule, t), Some(RescheduleRequested));
        assert_eq!(Approved.apply(Complete, t), Some(Completed));
        assert_eq!(Pending.apply(Complete, t), None);
        assert_eq!(RescheduleRequested.apply(Approve, t), None);
        // 教师不能代替家长操作
        assert_eq!(RescheduleRequested.apply(Accept, t), None);
        assert_eq!(Pending.apply(Cancel, t), None);
    }

    #[test]
    fn test_parent_transitions() {
        let p = PtmActor::Parent;
        assert_eq!(RescheduleRequested.apply(Accept, p), Some(Approved));
        assert_eq!(RescheduleRequested.apply(Decline, p), Some(Rejected));
        assert_eq!(Pending.apply(Cancel, p), Some(Cancelled));
        assert_eq!(Approved.apply(Cancel, p), Some(Cancelled));
        assert_eq!(RescheduleRequested.apply(Cancel, p), Some(Cancelled));
        assert_eq!(Pending.apply(Approve, p), None);
        assert_eq!(Pending.apply(Accept, p), None);
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        for status in [Completed, Rejected, Cancelled] {
            assert!(status.is_terminal());
            for action in PtmAction::ALL {
                assert_eq!(status.apply(*action, PtmActor::Teacher), None);
                assert_eq!(status.apply(*action, PtmActor::Parent), None);
            }
        }
        assert!(!Pending.is_terminal());
    }

    fn booking(id: i64, start: DateTime<Utc>, minutes: i32, status: PtmStatus) -> PtmBooking {
        PtmBooking {
            id,
            parent_id: 1,
            teacher_id: 2,
            student_id: 3,
            scheduled_at: start,
            duration_minutes: minutes,
            agenda: None,
            status,
            proposed_at: None,
            teacher_note: None,
            parent_note: None,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_overlap_detection() {
        let base = Utc::now() + Duration::days(1);
        let approved = vec![
            booking(1, base, 15, Approved),
            booking(2, base + Duration::hours(1), 15, Pending),
        ];
        assert_eq!(
            find_overlap(&approved, 0, base + Duration::minutes(10), 15).map(|b| b.id),
            Some(1)
        );
        // 首尾相接不冲突
        assert!(find_overlap(&approved, 0, base + Duration::minutes(15), 15).is_none());
        // 未批准的预约不占用时间
        assert!(find_overlap(&approved, 0, base + Duration::hours(1), 15).is_none());
        // 排除自身
        assert!(find_overlap(&approved, 1, base, 15).is_none());
    }
}
