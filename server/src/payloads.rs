use actix_web::HttpResponse;
pub use common::payloads::*;
use serde::Serialize;

pub trait IntoHttpResponse {
    /// Serializes the envelope with the status its variant stands for.
    fn into_response(self) -> HttpResponse;
}

impl<T: Serialize> IntoHttpResponse for ApiPayload<T> {
    fn into_response(self) -> HttpResponse {
        let mut builder = match self {
            ApiPayload::Ok(_) => HttpResponse::Ok(),
            ApiPayload::NotFound => HttpResponse::NotFound(),
        };
        builder.json(self)
    }
}
