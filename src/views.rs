pub mod graficos;
pub mod pagina;
pub mod templates;
