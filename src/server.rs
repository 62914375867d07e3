//! Native HTTP server running the same router as the Spin component.

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use tracing::{error, info};

use crate::config::Config;
use crate::routes::dispatch;
use crate::store::{check_credentials, Backend, MemoryStore, StoreHandle};

pub struct AppState {
    pub config: Config,
    pub store: MemoryStore,
}

impl AppState {
    pub fn new(config: Config, store: MemoryStore) -> Self {
        Self { config, store }
    }

    /// Native builds only keep posts in memory; the SQLite backend needs
    /// the Spin host.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        match Backend::parse(&config.store_url)? {
            Backend::Memory => Ok(Self::new(config, MemoryStore::seeded())),
            Backend::Sqlite(label) => Err(anyhow::anyhow!(
                "sqlite://{label} is only available inside the Spin runtime"
            )),
        }
    }
}

mod adapter {
    use actix_web::HttpRequest;
    use spin_sdk::http::{Method, Request};

    use crate::core::helpers::ApiResponse;

    pub fn actix_to_spin_request(req: &HttpRequest, body: actix_web::web::Bytes) -> Request {
        let method = match req.method().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            "PATCH" => Method::Patch,
            other => Method::Other(other.to_string()),
        };

        let uri = req.uri().to_string();

        let mut builder = Request::builder();
        builder.method(method).uri(&uri);
        for (name, value) in req.headers() {
            if let Ok(val_str) = value.to_str() {
                builder.header(name.as_str(), val_str);
            }
        }

        builder.body(body.to_vec()).build()
    }

    pub fn api_to_actix_response(resp: ApiResponse) -> actix_web::HttpResponse {
        let mut response = actix_web::HttpResponse::build(
            actix_web::http::StatusCode::from_u16(resp.status)
                .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR),
        );
        for (name, value) in &resp.headers {
            response.insert_header((name.as_str(), value.as_str()));
        }

        response.body(resp.body)
    }
}

pub async fn handle_all(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> HttpResponse {
    let spin_req = adapter::actix_to_spin_request(&req, body);

    let resp = dispatch(&spin_req, &state.config, || {
        check_credentials(&state.config)?;
        Ok(Box::new(&state.store) as StoreHandle)
    });

    info!(
        method = %req.method(),
        path = %req.path(),
        status = resp.status,
        "handled request"
    );
    adapter::api_to_actix_response(resp)
}

pub async fn run(config: Config, bind_addr: &str) -> anyhow::Result<()> {
    let state = web::Data::new(AppState::from_config(config)?);
    info!("Server listening on http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .default_service(web::route().to(handle_all))
    })
    .bind(bind_addr)
    .map_err(|e| {
        error!(error = %e, "failed to bind {bind_addr}");
        e
    })?
    .run()
    .await?;

    Ok(())
}
