use spin_sdk::http::{Method, Request};

use crate::config::Config;
use crate::core::cors::{preflight, with_cors};
use crate::core::errors::ApiError;
use crate::core::helpers::ApiResponse;
use crate::store::{StoreError, StoreHandle};
use crate::{likes, posts};

/// Routes one request. `open_store` is called at most once, and only by
/// handlers that need the store.
pub fn dispatch<'a, F>(req: &Request, config: &Config, open_store: F) -> ApiResponse
where
    F: FnOnce() -> Result<StoreHandle<'a>, StoreError>,
{
    let path = req.path();

    let result = match (req.method(), path) {
        (Method::Options, _) => return preflight(config),
        (Method::Post, "/increment-likes") => likes::increment_like(req, open_store),
        (Method::Get, "/posts") | (Method::Get, "/posts/") => posts::list_posts(open_store),
        (Method::Get, p) if p.starts_with("/posts/") => posts::get_post(p, open_store),
        _ => Err(ApiError::NotFound("No route found".to_string())),
    };

    let resp = result.unwrap_or_else(ApiResponse::from);
    with_cors(resp, config)
}
