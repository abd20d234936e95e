//! Authentication and session management

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod session;

pub use jwt::{sign_token, validate_token, Claims};
pub use middleware::{extract_session_from_request, require_auth};
pub use models::{LoginRequest, LoginResponse, UpdatePasswordRequest, STAFF_ROLES};
pub use password::{hash_password, verify_password};
pub use session::{authorize_user, Session};
