pub mod get;
pub mod password;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::requests::{ChangePasswordRequest, UpdateProfileRequest};

lazy_service!(
    /// 当前用户的个人资料
    ProfileService
);

impl ProfileService {
    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_profile(self, request).await
    }

    pub async fn update_profile(
        &self,
        update: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_profile(self, update, request).await
    }

    pub async fn change_password(
        &self,
        change: ChangePasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password::change_password(self, change, request).await
    }
}
