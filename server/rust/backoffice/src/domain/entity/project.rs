use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub plan_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub company_name: Option<String>,
    pub sign_image: Option<String>,
    pub size: Option<f64>,
    pub measuring_unit: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub plan_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub company_name: Option<String>,
    pub size: Option<f64>,
    pub measuring_unit: Option<String>,
    /// Stored file name, filled in by the use case after the upload is
    /// validated and written. Never taken from the request body.
    #[serde(skip)]
    pub sign_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub plan_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub company_name: Option<String>,
    pub size: Option<f64>,
    pub measuring_unit: Option<String>,
    /// Stored file name of a replacement upload; see [`CreateProject`].
    #[serde(skip)]
    pub sign_image: Option<String>,
}

/// An uploaded sign-image as received from the multipart form, before
/// extension/size validation.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
