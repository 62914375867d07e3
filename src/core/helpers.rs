use serde::Serialize;
use spin_sdk::http::Response;

pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Transport-neutral response produced by the router. Converted into a
/// Spin response by the component and into an actix response natively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body,
            },
            Err(e) => Self {
                status: 500,
                headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
                body: format!("Failed to encode response: {e}").into_bytes(),
            },
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl From<ApiResponse> for Response {
    fn from(resp: ApiResponse) -> Self {
        let mut builder = Response::builder();
        builder.status(resp.status);
        for (name, value) in resp.headers {
            builder.header(name, value);
        }
        builder.body(resp.body).build()
    }
}
