use serde::{Deserialize, Serialize};

#[derive(Deserialize, utoipa::IntoParams)]
pub struct UploadUrlQuery {
    /// Object key to upload to / read from.
    pub name: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadUrlResponse {
    pub url: String,
}
