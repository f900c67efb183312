use serde::Serialize;

/// A protected resource the requester is entitled to.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ResourceResponse {
    pub id: i32,
    pub year: i32,
    #[schema(example = "Photos 2024")]
    pub display_name: String,
    pub access_url: String,
}
