use super::helpers::ApiResponse;
use crate::config::{Config, ALLOWED_HEADERS, ALLOWED_METHODS};

/// Adds the cross-origin headers every response carries.
pub fn with_cors(resp: ApiResponse, config: &Config) -> ApiResponse {
    resp.with_header("Access-Control-Allow-Origin", &config.allow_origin)
        .with_header("Access-Control-Allow-Methods", ALLOWED_METHODS)
        .with_header("Access-Control-Allow-Headers", ALLOWED_HEADERS)
}

/// Answer to an `OPTIONS` preflight: 200, no body.
pub fn preflight(config: &Config) -> ApiResponse {
    with_cors(ApiResponse::empty(200), config)
}
