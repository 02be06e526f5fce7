pub mod render;
pub mod request;
