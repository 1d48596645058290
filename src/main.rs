//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use painel_andamentos::{app, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger; RUST_LOG ajusta o nível (padrão: info).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a lista de servidores falhar, a aplicação não deve iniciar.
    let app_state = config::AppState::from_env()?;

    let app = app::build_router(app_state);

    // Inicia o servidor
    let addr = config::app_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Painel escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
