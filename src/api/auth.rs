//! Auth Endpoints

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, MeResponse, MessageResponse, RegisterRequest, User};

impl ApiClient {
    /// `POST /login`; the caller stores the returned token
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post("/login", request).await
    }

    /// `POST /register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        self.post("/register", request).await
    }

    /// `GET /me` (session check)
    pub async fn me(&self) -> Result<User, ApiError> {
        let response: MeResponse = self.get("/me").await?;
        Ok(response.user)
    }
}
