use spin_sdk::http::Request;
use tracing::{error, info, warn};

use crate::core::errors::ApiError;
use crate::core::helpers::ApiResponse;
use crate::models::{IncrementLikeRequest, IncrementLikeResponse};
use crate::store::{StoreError, StoreHandle};

pub const MISSING_POST_ID: &str = "Post ID is required";

/// Validates the body of an increment request and returns the post id.
///
/// An absent body, an absent or null `postId`, and a blank `postId` all
/// count as missing. Anything that is not a JSON object, or a `postId` that
/// is not a string, is malformed.
pub fn parse_post_id(body: &[u8]) -> Result<String, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::BadRequest(MISSING_POST_ID.to_string()));
    }

    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))?;
    if !value.is_object() {
        return Err(ApiError::BadRequest(
            "Invalid request body: expected a JSON object".to_string(),
        ));
    }

    let request: IncrementLikeRequest = serde_json::from_value(value)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))?;

    match request.post_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ApiError::BadRequest(MISSING_POST_ID.to_string())),
    }
}

/// `POST /increment-likes`
///
/// The store is only opened once the body has been validated.
pub fn increment_like<'a, F>(req: &Request, open_store: F) -> Result<ApiResponse, ApiError>
where
    F: FnOnce() -> Result<StoreHandle<'a>, StoreError>,
{
    let post_id = parse_post_id(req.body()).map_err(|e| {
        warn!(error = %e, "rejected like request");
        e
    })?;

    let store = open_store().map_err(|e| {
        error!(error = %e, "failed to open like store");
        ApiError::from(e)
    })?;

    let rows = store.increment_likes(&post_id).map_err(|e| {
        error!(post_id = %post_id, error = %e, "like increment failed");
        ApiError::from(e)
    })?;

    match rows.first() {
        Some(row) => info!(post_id = %post_id, likes_count = row.likes_count, "like recorded"),
        None => warn!(post_id = %post_id, "like for unknown post affected no rows"),
    }

    Ok(ApiResponse::json(
        200,
        &IncrementLikeResponse {
            success: true,
            data: rows,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::helpers::now_iso;
    use crate::models::PostRecord;
    use crate::store::{LikeStore, MemoryStore};
    use spin_sdk::http::Method;

    fn post_request(body: &str) -> Request {
        Request::builder()
            .method(Method::Post)
            .uri("/increment-likes")
            .header("Content-Type", "application/json")
            .body(body.as_bytes().to_vec())
            .build()
    }

    fn store_with(id: &str, likes: i64) -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert(PostRecord {
                id: id.to_string(),
                likes_count: likes,
                created_at: now_iso(),
                updated_at: None,
            })
            .unwrap();
        store
    }

    fn body_json(resp: &ApiResponse) -> serde_json::Value {
        serde_json::from_slice(&resp.body).unwrap()
    }

    #[test]
    fn parse_accepts_post_id() {
        assert_eq!(parse_post_id(br#"{"postId": "abc"}"#).unwrap(), "abc");
        assert_eq!(parse_post_id(br#"{"postId": "  abc "}"#).unwrap(), "abc");
    }

    #[test]
    fn parse_treats_absent_and_blank_as_missing() {
        let missing = ApiError::BadRequest(MISSING_POST_ID.to_string());
        assert_eq!(parse_post_id(b"").unwrap_err(), missing);
        assert_eq!(parse_post_id(b"{}").unwrap_err(), missing);
        assert_eq!(parse_post_id(br#"{"postId": null}"#).unwrap_err(), missing);
        assert_eq!(parse_post_id(br#"{"postId": ""}"#).unwrap_err(), missing);
        assert_eq!(parse_post_id(br#"{"postId": "   "}"#).unwrap_err(), missing);
    }

    #[test]
    fn parse_rejects_malformed_bodies() {
        let bodies: [&[u8]; 4] = [b"{not json", br#"{"postId": 42}"#, br#"["abc"]"#, b"null"];
        for body in bodies {
            match parse_post_id(body) {
                Err(ApiError::BadRequest(msg)) => {
                    assert!(msg.starts_with("Invalid request body"), "{msg}")
                }
                other => panic!("expected malformed body error, got {other:?}"),
            }
        }
    }

    #[test]
    fn increments_existing_post() {
        let store = store_with("p1", 7);
        let resp = increment_like(&post_request(r#"{"postId":"p1"}"#), || {
            Ok(Box::new(&store) as StoreHandle)
        })
        .unwrap();

        assert_eq!(resp.status, 200);
        let body = body_json(&resp);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"][0]["id"], "p1");
        assert_eq!(body["data"][0]["likes_count"], 8);
        assert_eq!(store.get_post("p1").unwrap().unwrap().likes_count, 8);
    }

    #[test]
    fn missing_id_never_opens_store() {
        let mut opened = false;
        let err = increment_like(&post_request("{}"), || {
            opened = true;
            Err(StoreError::Connection("should not connect".to_string()))
        })
        .unwrap_err();

        assert_eq!(err.status(), 400);
        assert_eq!(err.message(), MISSING_POST_ID);
        assert!(!opened);
    }

    #[test]
    fn unknown_post_returns_zero_rows() {
        let store = store_with("p1", 0);
        let resp = increment_like(&post_request(r#"{"postId":"nope"}"#), || {
            Ok(Box::new(&store) as StoreHandle)
        })
        .unwrap();

        assert_eq!(resp.status, 200);
        assert_eq!(body_json(&resp), serde_json::json!({"success": true, "data": []}));
    }

    #[test]
    fn store_failure_surfaces_message() {
        let err = increment_like(&post_request(r#"{"postId":"p1"}"#), || {
            Err(StoreError::Connection("connection refused".to_string()))
        })
        .unwrap_err();

        assert_eq!(err, ApiError::Internal("connection refused".to_string()));
    }
}
