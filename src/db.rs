pub mod andamentos_repo;
pub use andamentos_repo::{AndamentoSource, AndamentosRepository};
