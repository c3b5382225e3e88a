pub mod bars;
pub mod maps;
pub mod panels;
