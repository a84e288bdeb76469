pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod parents;
pub mod students;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::requests::{
    CreateUserRequest, LinkChildRequest, StudentProfileInput, UpdateUserRequest, UserListParams,
};

lazy_service!(UserService);

impl UserService {
    // 获取用户列表
    pub async fn list_users(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, query, request).await
    }

    // 创建用户
    pub async fn create_user(
        &self,
        user_data: CreateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, user_data, request).await
    }

    // 根据ID获取用户
    pub async fn get_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_user(self, user_id, request).await
    }

    // 更新用户信息
    pub async fn update_user(
        &self,
        user_id: i64,
        update_data: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, update_data, request).await
    }

    // 删除用户
    pub async fn delete_user(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, user_id, request).await
    }

    // 更新学籍
    pub async fn update_student_profile(
        &self,
        student_id: i64,
        input: StudentProfileInput,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::update_student_profile(self, student_id, input, request).await
    }

    // 家长的子女列表
    pub async fn list_children(
        &self,
        parent_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        parents::list_children(self, parent_id, request).await
    }

    // 家长查看本人的子女
    pub async fn list_my_children(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        parents::list_my_children(self, request).await
    }

    // 关联子女
    pub async fn link_child(
        &self,
        parent_id: i64,
        link: LinkChildRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        parents::link_child(self, parent_id, link, request).await
    }

    // 解除关联
    pub async fn unlink_child(
        &self,
        parent_id: i64,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        parents::unlink_child(self, parent_id, student_id, request).await
    }
}
