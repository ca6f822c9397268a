pub mod init;
pub mod serve;
pub mod student;
pub mod user;
