// handlers/mod.rs - JSON route handlers
//
// Handlers only parse requests, call into `services`, and map `None` to 404.
// Public routes: login/signup and all reads.
// Protected routes (JWT via `middleware::jwt_auth_middleware`): every write.

pub mod auth;
pub mod reviews;
pub mod students;
pub mod users;
