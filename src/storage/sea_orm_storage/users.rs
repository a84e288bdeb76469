use super::{SeaOrmStorage, page_bounds};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{EduBridgeError, Result};
use crate::models::users::{
    entities::{User, UserRole, UserStatus},
    requests::{NewUser, UserChanges, UserListQuery},
    responses::UserListResponse,
};
use crate::storage::UserStorage;
use crate::utils::escape_like_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

#[async_trait]
impl UserStorage for SeaOrmStorage {
    async fn create_user(&self, req: NewUser) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            display_name: Set(req.display_name),
            phone: Set(req.phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        // 唯一约束冲突经 From<DbErr> 归类为 Conflict
        let result = model.insert(&self.db).await?;

        Ok(result.into_user())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Users::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("批量查询用户失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_user()).collect())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        let (page, size) = page_bounds(query.page, query.size);

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::DisplayName.contains(&escaped)),
            );
        }

        // 角色筛选
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let (users, pagination) = self.fetch_page(select, page, size).await?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination,
        })
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        // 先检查用户是否存在
        if self.get_user_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(email) = changes.email {
            model.email = Set(email);
        }

        if let Some(password_hash) = changes.password_hash {
            model.password_hash = Set(password_hash);
        }

        if let Some(status) = changes.status {
            model.status = Set(status.to_string());
        }

        if let Some(display_name) = changes.display_name {
            model.display_name = Set(Some(display_name));
        }

        if let Some(phone) = changes.phone {
            model.phone = Set(Some(phone));
        }

        if let Some(avatar_url) = changes.avatar_url {
            model.avatar_url = Set(Some(avatar_url));
        }

        model.update(&self.db).await?;

        self.get_user_by_id(id).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                EduBridgeError::database_operation(format!("更新最后登录时间失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    async fn count_users(&self, role: Option<UserRole>) -> Result<i64> {
        let mut select = Users::find();
        if let Some(role) = role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count as i64)
    }
}
