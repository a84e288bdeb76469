//! 科目存储操作

use super::{SeaOrmStorage, page_bounds};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{EduBridgeError, Result};
use crate::models::classes::{
    entities::Subject,
    requests::{CreateSubjectRequest, UpdateSubjectRequest},
    responses::SubjectListResponse,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建科目，code 统一转为大写
    pub(crate) async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            code: Set(req.code.trim().to_uppercase()),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_subject())
    }

    pub(crate) async fn get_subject_by_id_impl(&self, subject_id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(subject_id)
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub(crate) async fn get_subjects_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Subject>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Subjects::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_subject()).collect())
    }

    pub(crate) async fn list_subjects_with_pagination_impl(
        &self,
        page: Option<i64>,
        size: Option<i64>,
        search: Option<String>,
    ) -> Result<SubjectListResponse> {
        let (page, size) = page_bounds(page, size);

        let mut select = Subjects::find();

        if let Some(ref search) = search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Code.contains(&escaped)),
            );
        }

        select = select.order_by_asc(Column::Name);

        let (subjects, pagination) = self.fetch_page(select, page, size).await?;

        Ok(SubjectListResponse {
            items: subjects.into_iter().map(|m| m.into_subject()).collect(),
            pagination,
        })
    }

    pub(crate) async fn update_subject_impl(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let Some(existing) = Subjects::find_by_id(subject_id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }

        if let Some(code) = update.code {
            model.code = Set(code.trim().to_uppercase());
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model.updated_at = Set(chrono::Utc::now().timestamp());

        Ok(Some(model.update(&self.db).await?.into_subject()))
    }

    pub(crate) async fn delete_subject_impl(&self, subject_id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(subject_id)
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
