pub mod review_service;
pub mod student_service;
pub mod user_service;

pub use review_service::ReviewError;
pub use user_service::UserError;
