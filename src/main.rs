use std::net::SocketAddr;

use anyhow::Context;

use todo_api::{
    config::AppConfig, db::connection::open_repository, logging::init_tracing, routes,
    state::AppState,
};

#[tokio::main]
async fn main() {
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("failed to load config: {err:?}");
            std::process::exit(1);
        }
    };

    if let Err(err) = init_tracing(&cfg.logging.rust_log) {
        eprintln!("{err:?}");
        std::process::exit(1);
    }

    if let Err(err) = run(cfg).await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let todos = open_repository(&cfg).await?;

    let addr: SocketAddr = format!("{}:{}", cfg.general.host, cfg.general.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                cfg.general.host, cfg.general.port
            )
        })?;

    let state = AppState::new(cfg, todos);
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on http://{}{}", addr, routes::API_PREFIX);
    axum::serve(listener, app).await?;
    Ok(())
}
