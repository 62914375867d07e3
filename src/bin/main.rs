#[cfg(not(target_arch = "wasm32"))]
mod native {
    use petogram::config::{bind_addr, Config};
    use tracing_subscriber::EnvFilter;

    pub const DEV_SERVICE_ROLE_KEY: &str = "dev-service-role";

    pub fn init_tracing() {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false).init();
    }

    pub async fn run() -> anyhow::Result<()> {
        init_tracing();
        let config = Config::from_env_or("memory://", DEV_SERVICE_ROLE_KEY);
        petogram::server::run(config, &bind_addr()).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    native::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
