//! 班级存储操作

use std::collections::{BTreeSet, HashMap};

use super::{SeaOrmStorage, page_bounds};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::prelude::{Subjects, TimetableSlots, Users};
use crate::entity::{subjects, timetable_slots, users};
use crate::errors::{EduBridgeError, Result};
use crate::models::{
    classes::{
        entities::{Class, Subject},
        requests::{
            ClassListQuery, CreateClassRequest, CreateSubjectRequest, UpdateClassRequest,
            UpdateSubjectRequest,
        },
        responses::{ClassListResponse, SubjectListResponse},
    },
    users::responses::TeacherBrief,
};
use crate::storage::ClassStorage;
use crate::utils::escape_like_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

#[async_trait]
impl ClassStorage for SeaOrmStorage {
    async fn create_class(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            section: Set(req.section.trim().to_string()),
            academic_year: Set(req.academic_year.trim().to_string()),
            class_teacher_id: Set(req.class_teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        // (name, section, academic_year) 唯一
        let result = model.insert(&self.db).await?;

        Ok(result.into_class())
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let (page, size) = page_bounds(query.page, query.size);

        let mut select = Classes::find();

        if let Some(ref year) = query.academic_year
            && !year.trim().is_empty()
        {
            select = select.filter(Column::AcademicYear.eq(year.trim()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Section.contains(&escaped)),
            );
        }

        select = select
            .order_by_desc(Column::AcademicYear)
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Section);

        let (classes, pagination) = self.fetch_page(select, page, size).await?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class()).collect(),
            pagination,
        })
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let Some(existing) = Classes::find_by_id(class_id).one(&self.db).await? else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let mut model: ActiveModel = existing.into();

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }

        if let Some(section) = update.section {
            model.section = Set(section.trim().to_string());
        }

        if let Some(year) = update.academic_year {
            model.academic_year = Set(year.trim().to_string());
        }

        if let Some(teacher_id) = update.class_teacher_id {
            model.class_teacher_id = Set(Some(teacher_id));
        }

        model.updated_at = Set(now);

        let updated = model.update(&self.db).await?;

        Ok(Some(updated.into_class()))
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn count_classes(&self) -> Result<i64> {
        let count = Classes::find()
            .count(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("统计班级数量失败: {e}")))?;

        Ok(count as i64)
    }

    async fn list_teacher_classes(&self, teacher_id: i64) -> Result<Vec<Class>> {
        let taught: BTreeSet<i64> = TimetableSlots::find()
            .filter(timetable_slots::Column::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| s.class_id)
            .collect();

        let classes = Classes::find()
            .filter(
                Condition::any()
                    .add(Column::ClassTeacherId.eq(teacher_id))
                    .add(Column::Id.is_in(taught)),
            )
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Section)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询教师班级失败: {e}")))?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }

    async fn teacher_teaches(
        &self,
        teacher_id: i64,
        class_id: i64,
        subject_id: Option<i64>,
    ) -> Result<bool> {
        let is_class_teacher = Classes::find()
            .filter(Column::Id.eq(class_id))
            .filter(Column::ClassTeacherId.eq(teacher_id))
            .count(&self.db)
            .await?
            > 0;
        if is_class_teacher {
            return Ok(true);
        }

        let mut select = TimetableSlots::find()
            .filter(timetable_slots::Column::TeacherId.eq(teacher_id))
            .filter(timetable_slots::Column::ClassId.eq(class_id));
        if let Some(subject_id) = subject_id {
            select = select.filter(timetable_slots::Column::SubjectId.eq(subject_id));
        }

        Ok(select.count(&self.db).await? > 0)
    }

    async fn list_class_teachers(&self, class_id: i64) -> Result<Vec<TeacherBrief>> {
        let slots = TimetableSlots::find()
            .filter(timetable_slots::Column::ClassId.eq(class_id))
            .all(&self.db)
            .await?;

        let mut teacher_subjects: HashMap<i64, BTreeSet<i64>> = HashMap::new();
        for slot in &slots {
            teacher_subjects
                .entry(slot.teacher_id)
                .or_default()
                .insert(slot.subject_id);
        }

        if let Some(class) = Classes::find_by_id(class_id).one(&self.db).await?
            && let Some(teacher_id) = class.class_teacher_id
        {
            teacher_subjects.entry(teacher_id).or_default();
        }

        if teacher_subjects.is_empty() {
            return Ok(Vec::new());
        }

        let subject_names: HashMap<i64, String> = Subjects::find()
            .filter(subjects::Column::Id.is_in(slots.iter().map(|s| s.subject_id)))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let teachers = Users::find()
            .filter(users::Column::Id.is_in(teacher_subjects.keys().copied()))
            .all(&self.db)
            .await?;

        let mut briefs: Vec<TeacherBrief> = teachers
            .into_iter()
            .map(|t| {
                let user = t.into_user();
                let subjects = teacher_subjects
                    .get(&user.id)
                    .map(|ids| {
                        ids.iter()
                            .filter_map(|id| subject_names.get(id).cloned())
                            .collect()
                    })
                    .unwrap_or_default();
                TeacherBrief {
                    id: user.id,
                    name: user.name().to_string(),
                    subjects,
                }
            })
            .collect();
        briefs.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(briefs)
    }

    async fn create_subject(
        &self,
        req: CreateSubjectRequest,
    ) -> Result<Subject> {
        self.create_subject_impl(req).await
    }

    async fn get_subject_by_id(
        &self,
        subject_id: i64,
    ) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(subject_id).await
    }

    async fn get_subjects_by_ids(
        &self,
        ids: &[i64],
    ) -> Result<Vec<Subject>> {
        self.get_subjects_by_ids_impl(ids).await
    }

    async fn list_subjects_with_pagination(
        &self,
        page: Option<i64>,
        size: Option<i64>,
        search: Option<String>,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(page, size, search)
            .await
    }

    async fn update_subject(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(subject_id, update).await
    }

    async fn delete_subject(&self, subject_id: i64) -> Result<bool> {
        self.delete_subject_impl(subject_id).await
    }
}
