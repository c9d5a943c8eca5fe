use axum::{extract::rejection::JsonRejection, Json};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::products::repo_types::ProductFields;

/// One row of the count-over-price result.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ProductCount {
    #[serde(rename = "productCount")]
    pub product_count: u64,
}

/// Non-zero counts come back as a single row; zero comes back as an empty array.
pub fn count_rows(count: u64) -> Vec<ProductCount> {
    if count == 0 {
        Vec::new()
    } else {
        vec![ProductCount {
            product_count: count,
        }]
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid ID"))
}

pub fn parse_price(raw: &str) -> ApiResult<f64> {
    js_number(raw)
        .filter(|p| !p.is_nan())
        .ok_or(ApiError::BadRequest("Invalid price parameter"))
}

/// String-to-number conversion following JavaScript's `Number()`: blank is 0,
/// `Infinity` is spelled out, and unsigned `0x`/`0o`/`0b` literals are accepted.
fn js_number(raw: &str) -> Option<f64> {
    let s = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return Some(0.0);
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    let radix = match unsigned.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &unsigned[2..];
        // radix literals take no sign, before or after the prefix
        if unsigned.len() != s.len() || digits.is_empty() || digits.starts_with(['+', '-']) {
            return None;
        }
        return u128::from_str_radix(digits, radix).ok().map(|v| v as f64);
    }

    // keeps out Rust-only spellings such as `inf` and `NaN`
    let decimal_only = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal_only {
        return None;
    }
    s.parse::<f64>().ok()
}

/// A body is only usable as product fields when it is a JSON object.
/// Any `_id` the caller sent is dropped; the store owns identifiers.
pub fn into_fields(body: Value) -> Option<ProductFields> {
    match body {
        Value::Object(mut map) => {
            map.remove("_id");
            Some(map)
        }
        _ => None,
    }
}

/// Update fields from a PATCH body. A request without a JSON content type
/// carries no fields, which makes the update a no-op. A JSON body must be an object.
pub fn patch_fields(body: Result<Json<Value>, JsonRejection>) -> ApiResult<ProductFields> {
    match body {
        Ok(Json(v)) => into_fields(v).ok_or(ApiError::BadRequest("Invalid request body")),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(ProductFields::new()),
        Err(_) => Err(ApiError::BadRequest("Invalid request body")),
    }
}

/// Absent, null, false, zero and empty strings do not count as provided.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

pub fn has_required_fields(fields: &ProductFields) -> bool {
    is_truthy(fields.get("name")) && is_truthy(fields.get("price"))
}
