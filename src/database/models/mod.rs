pub mod review;
pub mod student;
pub mod user;

pub use review::{Review, ReviewJson};
pub use student::{Student, StudentJson};
pub use user::{User, UserJson};
