pub mod app;
pub mod lookup;
pub mod render;
