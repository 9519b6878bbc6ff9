use serde::Serialize;

pub mod contact;

#[derive(Serialize)]
pub struct ApiError {
    pub error: &'static str,
}

#[derive(Serialize)]
pub struct ApiSuccess {
    pub success: bool,
}

impl Default for ApiSuccess {
    fn default() -> Self {
        Self { success: true }
    }
}
