use tracing::error;

use crate::core::errors::ApiError;
use crate::core::helpers::ApiResponse;
use crate::store::{StoreError, StoreHandle};

fn open<'a, F>(open_store: F) -> Result<StoreHandle<'a>, ApiError>
where
    F: FnOnce() -> Result<StoreHandle<'a>, StoreError>,
{
    open_store().map_err(|e| {
        error!(error = %e, "failed to open like store");
        ApiError::from(e)
    })
}

/// `GET /posts`
pub fn list_posts<'a, F>(open_store: F) -> Result<ApiResponse, ApiError>
where
    F: FnOnce() -> Result<StoreHandle<'a>, StoreError>,
{
    let posts = open(open_store)?.list_posts()?;
    Ok(ApiResponse::json(200, &posts))
}

/// `GET /posts/{id}`
pub fn get_post<'a, F>(path: &str, open_store: F) -> Result<ApiResponse, ApiError>
where
    F: FnOnce() -> Result<StoreHandle<'a>, StoreError>,
{
    let post_id = path.trim_start_matches("/posts/").trim_end_matches('/');
    if post_id.is_empty() || post_id.contains('/') {
        return Err(ApiError::NotFound("Post not found".to_string()));
    }

    match open(open_store)?.get_post(post_id)? {
        Some(post) => Ok(ApiResponse::json(200, &post)),
        None => Err(ApiError::NotFound("Post not found".to_string())),
    }
}
