pub mod config;
pub mod core;
pub mod feed;
pub mod likes;
pub mod models;
pub mod posts;
pub mod routes;
pub mod store;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;

#[cfg(target_arch = "wasm32")]
mod component {
    use spin_sdk::http::{IntoResponse, Request, Response};
    use spin_sdk::http_component;

    use crate::config::Config;
    use crate::routes::dispatch;
    use crate::store::open_store;

    /// Edge function entry point. Configuration is read once here and the
    /// store is opened per request, only if the route needs it.
    #[http_component]
    fn handle_petogram(req: Request) -> anyhow::Result<impl IntoResponse> {
        let config = Config::from_env();
        let resp = dispatch(&req, &config, || open_store(&config));
        Ok(Response::from(resp))
    }
}
