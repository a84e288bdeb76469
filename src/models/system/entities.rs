use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    /// 配置值类型
    #[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
    pub enum SettingValueType {
        String => "string",
        Integer => "integer",
        Float => "float",
    }
}

/// 已知配置键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownSettingKey {
    SchoolName,
    AcademicYear,
    CurrentTerm,
    ExamAutosaveGraceSecs,
    PtmDefaultDuration,
    AttendanceWarningThreshold,
}

impl KnownSettingKey {
    pub const ALL: [KnownSettingKey; 6] = [
        KnownSettingKey::SchoolName,
        KnownSettingKey::AcademicYear,
        KnownSettingKey::CurrentTerm,
        KnownSettingKey::ExamAutosaveGraceSecs,
        KnownSettingKey::PtmDefaultDuration,
        KnownSettingKey::AttendanceWarningThreshold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KnownSettingKey::SchoolName => "school.name",
            KnownSettingKey::AcademicYear => "school.academic_year",
            KnownSettingKey::CurrentTerm => "school.current_term",
            KnownSettingKey::ExamAutosaveGraceSecs => "school.exam_autosave_grace_secs",
            KnownSettingKey::PtmDefaultDuration => "school.ptm_default_duration",
            KnownSettingKey::AttendanceWarningThreshold => "school.attendance_warning_threshold",
        }
    }

    pub fn value_type(&self) -> SettingValueType {
        match self {
            KnownSettingKey::SchoolName
            | KnownSettingKey::AcademicYear
            | KnownSettingKey::CurrentTerm => SettingValueType::String,
            KnownSettingKey::ExamAutosaveGraceSecs | KnownSettingKey::PtmDefaultDuration => {
                SettingValueType::Integer
            }
            KnownSettingKey::AttendanceWarningThreshold => SettingValueType::Float,
        }
    }

    /// 校验并规范化配置值
    pub fn validate(&self, value: &str) -> Result<String, String> {
        let value = value.trim();
        match self {
            KnownSettingKey::SchoolName
            | KnownSettingKey::AcademicYear
            | KnownSettingKey::CurrentTerm => {
                if value.is_empty() || value.chars().count() > 100 {
                    return Err(format!("{} must be 1-100 characters", self.as_str()));
                }
                Ok(value.to_string())
            }
            KnownSettingKey::ExamAutosaveGraceSecs => {
                let v: i64 = value
                    .parse()
                    .map_err(|_| format!("{} must be an integer", self.as_str()))?;
                if !(0..=600).contains(&v) {
                    return Err(format!("{} must be between 0 and 600", self.as_str()));
                }
                Ok(v.to_string())
            }
            KnownSettingKey::PtmDefaultDuration => {
                let v: i64 = value
                    .parse()
                    .map_err(|_| format!("{} must be an integer", self.as_str()))?;
                if !(5..=240).contains(&v) {
                    return Err(format!("{} must be between 5 and 240", self.as_str()));
                }
                Ok(v.to_string())
            }
            KnownSettingKey::AttendanceWarningThreshold => {
                let v: f64 = value
                    .parse()
                    .map_err(|_| format!("{} must be a number", self.as_str()))?;
                if !(0.0..=100.0).contains(&v) {
                    return Err(format!("{} must be between 0 and 100", self.as_str()));
                }
                Ok(v.to_string())
            }
        }
    }
}

impl std::str::FromStr for KnownSettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnownSettingKey::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown setting key: {s}"))
    }
}

/// 系统设置实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    pub value_type: SettingValueType,
    pub description: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub updated_by: Option<i64>,
}

/// 设置审计日志实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SettingAudit {
    pub id: i64,
    pub setting_key: String,
    pub old_value: Option<String>,
    pub new_value: String,
    pub changed_by: i64,
    pub changed_at: chrono::DateTime<chrono::Utc>,
    pub ip_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parsing() {
        for key in KnownSettingKey::ALL {
            assert_eq!(key.as_str().parse::<KnownSettingKey>(), Ok(key));
        }
        assert!("upload.max_size".parse::<KnownSettingKey>().is_err());
    }

    #[test]
    fn test_validate_values() {
        use KnownSettingKey::*;
        assert_eq!(SchoolName.validate("  Hilltop High "), Ok("Hilltop High".to_string()));
        assert!(SchoolName.validate("   ").is_err());
        assert_eq!(ExamAutosaveGraceSecs.validate("45"), Ok("45".to_string()));
        assert!(ExamAutosaveGraceSecs.validate("-1").is_err());
        assert!(ExamAutosaveGraceSecs.validate("abc").is_err());
        assert!(PtmDefaultDuration.validate("1").is_err());
        assert_eq!(AttendanceWarningThreshold.validate("80.5"), Ok("80.5".to_string()));
        assert!(AttendanceWarningThreshold.validate("120").is_err());
    }

    #[test]
    fn test_value_types() {
        assert_eq!(KnownSettingKey::CurrentTerm.value_type(), SettingValueType::String);
        assert_eq!(
            KnownSettingKey::PtmDefaultDuration.value_type(),
            SettingValueType::Integer
        );
        assert_eq!(
            KnownSettingKey::AttendanceWarningThreshold.value_type(),
            SettingValueType::Float
        );
    }
}
