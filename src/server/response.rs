use actix_web::HttpResponse;
use serde::Serialize;

/// Uniform success envelope: `{success: true, payload: ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub payload: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(payload: T) -> HttpResponse {
        HttpResponse::Ok().json(ApiResponse { success: true, payload })
    }
}
