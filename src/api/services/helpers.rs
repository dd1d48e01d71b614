//! HTTP 响应帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, error, web};
use serde::Serialize;

use super::types::{ErrorResponse, MessageResponse};
use crate::errors::TtlinkerError;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

pub fn message_response(message: &str) -> HttpResponse {
    json_response(
        StatusCode::OK,
        &MessageResponse {
            message: message.to_string(),
        },
    )
}

pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    json_response(
        status,
        &ErrorResponse {
            error: message.to_string(),
        },
    )
}

/// 从 TtlinkerError 构建错误响应（自动映射 HTTP 状态码）
pub fn error_from_ttlinker(err: &TtlinkerError) -> HttpResponse {
    error_response(err.http_status(), err.message())
}

/// JSON 请求体解析失败时返回 `{ "error": ... }` 而不是纯文本
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            let response = error_response(StatusCode::BAD_REQUEST, &err.to_string());
            error::InternalError::from_response(err, response).into()
        })
}
