use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Class {
    pub id: i64,
    pub name: String,
    // 分班，如 "A"；可为空字符串
    pub section: String,
    pub academic_year: String,
    // 班主任
    pub class_teacher_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Class {
    /// 展示名，如 "Grade 5 - A"
    pub fn label(&self) -> String {
        if self.section.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.section)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_label() {
        let now = chrono::Utc::now();
        let mut class = Class {
            id: 1,
            name: "Grade 5".into(),
            section: "B".into(),
            academic_year: "2026-2027".into(),
            class_teacher_id: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(class.label(), "Grade 5 - B");
        class.section.clear();
        assert_eq!(class.label(), "Grade 5");
    }
}
