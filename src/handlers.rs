pub mod paineis;
