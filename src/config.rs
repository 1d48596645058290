// src/config.rs

use serde::Deserialize;
use std::{collections::BTreeSet, env, path::Path, sync::Arc};

use crate::{
    common::error::{AppError, ConfigError},
    db::AndamentosRepository,
    models::painel::PTB_TEAM,
    services::ReportService,
};

pub const MYSQL_PORT: u16 = 3306;
pub const DEFAULT_APP_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STAFF_FILE: &str = "config/ptb_staff.json";

// Cópia embutida da lista, usada quando o arquivo padrão não está ao lado do binário.
const BUNDLED_STAFF_LIST: &str = include_str!("../config/ptb_staff.json");

/// Dados de conexão com o banco, validados uma única vez na inicialização.
#[derive(Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

// A senha nunca vai para o log.
impl std::fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl DbSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma fonte qualquer de variáveis.
    /// `DB_PASSWORD` é opcional; host, usuário e banco são obrigatórios.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingField(key))
        };

        let host = required("DB_HOST")?;
        let user = required("DB_USER")?;
        let database = required("DB_DATABASE")?;
        let password = lookup("DB_PASSWORD").unwrap_or_default();

        Ok(Self {
            host,
            port: MYSQL_PORT,
            user,
            password,
            database,
        })
    }
}

#[derive(Debug, Deserialize)]
struct StaffListFile {
    team: String,
    names: Vec<String>,
}

/// Servidores cujos andamentos entram no painel da PTB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffAllowList {
    pub team: String,
    names: BTreeSet<String>,
}

impl StaffAllowList {
    pub fn new<I, S>(team: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            team: team.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let file: StaffListFile = serde_json::from_str(raw)
            .map_err(|e| ConfigError::InvalidStaffList(e.to_string()))?;

        // A lista só filtra o painel da PTB
        if file.team != PTB_TEAM {
            return Err(ConfigError::InvalidStaffList(format!(
                "a lista é da equipe {}, esperado {}",
                file.team, PTB_TEAM
            )));
        }

        if file.names.is_empty() {
            return Err(ConfigError::InvalidStaffList(
                "a lista de nomes está vazia".to_string(),
            ));
        }

        Ok(Self::new(file.team, file.names))
    }

    /// Lê o arquivo indicado em `PTB_STAFF_FILE`. Sem a variável, tenta o
    /// caminho padrão e, se ele não existir, usa a cópia embutida.
    pub fn load() -> anyhow::Result<Self> {
        match env::var("PTB_STAFF_FILE") {
            Ok(path) => Self::load_file(Path::new(&path)),
            Err(_) if Path::new(DEFAULT_STAFF_FILE).exists() => {
                Self::load_file(Path::new(DEFAULT_STAFF_FILE))
            }
            Err(_) => {
                tracing::info!("Usando a lista de servidores embutida no binário.");
                Ok(Self::from_json(BUNDLED_STAFF_LIST)?)
            }
        }
    }

    fn load_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Falha ao ler a lista de servidores em {}: {e}", path.display())
        })?;
        let list = Self::from_json(&raw)?;
        tracing::info!(
            "Lista de servidores carregada de {} ({} nomes)",
            path.display(),
            list.len()
        );
        Ok(list)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_settings: Result<DbSettings, ConfigError>,
    pub report_service: ReportService,
}

impl AppState {
    pub fn new(db_settings: Result<DbSettings, ConfigError>, report_service: ReportService) -> Self {
        Self {
            db_settings,
            report_service,
        }
    }

    // Falta de variáveis do banco não impede o servidor de subir: as páginas
    // exibem a mensagem de erro. Lista de servidores inválida, sim.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let db_settings = DbSettings::from_env();
        match &db_settings {
            Ok(settings) => tracing::info!(
                "✅ Configuração do banco carregada ({}@{}:{}/{})",
                settings.user,
                settings.host,
                settings.port,
                settings.database
            ),
            Err(e) => tracing::warn!("Configuração do banco incompleta: {}", e),
        }

        let staff = StaffAllowList::load()?;

        // --- Monta o gráfico de dependências ---
        let report_service = ReportService::new(Arc::new(AndamentosRepository::new()), Arc::new(staff));

        Ok(Self::new(db_settings, report_service))
    }

    pub fn db_settings(&self) -> Result<&DbSettings, AppError> {
        self.db_settings.as_ref().map_err(|e| AppError::from(e.clone()))
    }
}

pub fn app_addr() -> String {
    env::var("APP_ADDR").unwrap_or_else(|_| DEFAULT_APP_ADDR.to_string())
}
