//! 学籍与家长关联存储

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::prelude::{Classes, ParentStudents, StudentProfiles, Users};
use crate::entity::{parent_students, student_profiles, users};
use crate::errors::{EduBridgeError, Result};
use crate::models::users::{
    entities::{ParentLink, StudentProfile, StudentSummary},
    requests::StudentProfileInput,
    responses::ChildInfo,
};
use crate::storage::StudentStorage;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 按给定顺序生成学生摘要，缺少账号的 ID 被跳过
    async fn student_summaries(&self, student_ids: &[i64]) -> Result<Vec<StudentSummary>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let users: HashMap<i64, users::Model> = Users::find()
            .filter(users::Column::Id.is_in(student_ids.iter().copied()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let profiles: HashMap<i64, student_profiles::Model> = StudentProfiles::find()
            .filter(student_profiles::Column::UserId.is_in(student_ids.iter().copied()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.user_id, p))
            .collect();

        let class_ids: Vec<i64> = profiles.values().filter_map(|p| p.class_id).collect();
        let class_names: HashMap<i64, String> = if class_ids.is_empty() {
            HashMap::new()
        } else {
            Classes::find()
                .filter(crate::entity::classes::Column::Id.is_in(class_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|c| {
                    let class = c.into_class();
                    (class.id, class.label())
                })
                .collect()
        };

        Ok(student_ids
            .iter()
            .filter_map(|id| {
                let user = users.get(id)?;
                let profile = profiles.get(id);
                let class_id = profile.and_then(|p| p.class_id);
                Some(StudentSummary {
                    user_id: user.id,
                    username: user.username.clone(),
                    display_name: user.display_name.clone(),
                    class_id,
                    class_name: class_id.and_then(|cid| class_names.get(&cid).cloned()),
                    roll_number: profile.and_then(|p| p.roll_number),
                    admission_no: profile.and_then(|p| p.admission_no.clone()),
                })
            })
            .collect())
    }
}

#[async_trait]
impl StudentStorage for SeaOrmStorage {
    async fn upsert_student_profile(
        &self,
        user_id: i64,
        input: StudentProfileInput,
    ) -> Result<StudentProfile> {
        let now = chrono::Utc::now().timestamp();
        let admission_no = input
            .admission_no
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        let existing = StudentProfiles::find()
            .filter(student_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        let saved = match existing {
            Some(model) => {
                let mut active: student_profiles::ActiveModel = model.into();
                active.class_id = Set(input.class_id);
                active.roll_number = Set(input.roll_number);
                active.admission_no = Set(admission_no);
                active.date_of_birth = Set(input.date_of_birth);
                active.updated_at = Set(now);
                active.update(&self.db).await?
            }
            None => {
                student_profiles::ActiveModel {
                    user_id: Set(user_id),
                    class_id: Set(input.class_id),
                    roll_number: Set(input.roll_number),
                    admission_no: Set(admission_no),
                    date_of_birth: Set(input.date_of_birth),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?
            }
        };

        Ok(saved.into_profile())
    }

    async fn get_student_profile(&self, user_id: i64) -> Result<Option<StudentProfile>> {
        let result = StudentProfiles::find()
            .filter(student_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询学籍失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    async fn get_student_summary(&self, user_id: i64) -> Result<Option<StudentSummary>> {
        Ok(self.student_summaries(&[user_id]).await?.into_iter().next())
    }

    async fn list_class_students(&self, class_id: i64) -> Result<Vec<StudentSummary>> {
        let ids: Vec<i64> = StudentProfiles::find()
            .filter(student_profiles::Column::ClassId.eq(class_id))
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询班级学生失败: {e}")))?
            .into_iter()
            .map(|p| p.user_id)
            .collect();

        let mut students = self.student_summaries(&ids).await?;
        // 有学号的在前，按学号升序；其余按用户名
        students.sort_by(|a, b| match (a.roll_number, b.roll_number) {
            (Some(x), Some(y)) => x.cmp(&y).then(a.username.cmp(&b.username)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.username.cmp(&b.username),
        });

        Ok(students)
    }

    async fn link_parent(
        &self,
        parent_id: i64,
        student_id: i64,
        relationship: &str,
    ) -> Result<ParentLink> {
        let now = chrono::Utc::now().timestamp();

        let model = parent_students::ActiveModel {
            parent_id: Set(parent_id),
            student_id: Set(student_id),
            relationship: Set(relationship.to_string()),
            created_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_link())
    }

    async fn unlink_parent(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        let result = ParentStudents::delete_many()
            .filter(parent_students::Column::ParentId.eq(parent_id))
            .filter(parent_students::Column::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("解除家长关联失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn list_children(&self, parent_id: i64) -> Result<Vec<ChildInfo>> {
        let links = ParentStudents::find()
            .filter(parent_students::Column::ParentId.eq(parent_id))
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询子女失败: {e}")))?;

        let ids: Vec<i64> = links.iter().map(|l| l.student_id).collect();
        let summaries = self.student_summaries(&ids).await?;

        Ok(summaries
            .into_iter()
            .filter_map(|student| {
                let link = links.iter().find(|l| l.student_id == student.user_id)?;
                Some(ChildInfo {
                    relationship: link.relationship.clone(),
                    student,
                })
            })
            .collect())
    }

    async fn is_parent_of(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        let count = ParentStudents::find()
            .filter(parent_students::Column::ParentId.eq(parent_id))
            .filter(parent_students::Column::StudentId.eq(student_id))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn list_parent_ids(&self, student_id: i64) -> Result<Vec<i64>> {
        let links = ParentStudents::find()
            .filter(parent_students::Column::StudentId.eq(student_id))
            .all(&self.db)
            .await?;

        Ok(links.into_iter().map(|l| l.parent_id).collect())
    }
}
