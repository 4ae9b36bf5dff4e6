pub mod evaluate;
pub mod init;
pub mod profile;
pub mod validate;
