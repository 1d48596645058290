pub mod andamento;
pub mod painel;
pub mod relatorio;
