use serde::Serialize;

/// Success envelope: `{"success": true, "data": ..., "message": ...}`.
/// The calling UI branches on `success` and reads `data`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Paginated listing payload, carried inside `data`.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub records: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

/// Login success body. Auth endpoints do not use the `success` envelope.
#[derive(Debug, Serialize)]
pub struct LoginResponse<T: Serialize> {
    pub token: String,
    pub user: T,
}
