use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Falha ao montar a configuração de conexão (a página nem começa).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("variável de ambiente ausente ou vazia: {0}")]
    MissingField(&'static str),

    #[error("lista de servidores inválida: {0}")]
    InvalidStaffList(String),
}

// Dados que vieram do banco mas não puderam ser agregados.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    #[error("data de publicação inválida na linha {row}: {value}")]
    InvalidDate { row: usize, value: String },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de configuração: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Erro de banco de dados: {0}")]
    DataSource(#[from] sqlx::Error),

    #[error("Erro de agregação: {0}")]
    Aggregation(#[from] AggregationError),

    #[error("Aba desconhecida: {0}")]
    UnknownTab(String),

    #[error("Erro ao montar a página: {0}")]
    Template(#[from] askama::Error),
}

impl AppError {
    /// Mensagem exibida ao usuário na página (e no corpo JSON da API).
    pub fn user_message(&self) -> String {
        match self {
            AppError::Configuration(_) => {
                "Faltam informações de conexão com o banco de dados.".to_string()
            }
            AppError::DataSource(e) => format!("Erro na conexão com o banco de dados: {e}"),
            AppError::Aggregation(e) => format!("Erro ao processar os dados: {e}"),
            AppError::UnknownTab(tab) => format!("Aba desconhecida: {tab}"),
            AppError::Template(_) => "Não foi possível montar a página.".to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DataSource(_) => StatusCode::BAD_GATEWAY,
            AppError::Aggregation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnknownTab(_) => StatusCode::NOT_FOUND,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // O `tracing` loga a mensagem detalhada; o cliente recebe a versão amigável.
        if status.is_server_error() {
            tracing::error!("Erro ao gerar relatório: {}", self);
        } else {
            tracing::warn!("Requisição recusada: {}", self);
        }

        let body = Json(json!({ "error": self.user_message() }));
        (status, body).into_response()
    }
}
