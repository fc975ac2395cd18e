pub mod init;
pub mod list;
pub mod render;
pub mod score;
pub mod take;
pub mod validate;
