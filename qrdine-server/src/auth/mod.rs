//! Owner Authentication
//!
//! 商户认证: JWT 签发与校验, Argon2 密码处理

pub mod owner_auth;
pub mod password;

pub use owner_auth::{OwnerClaims, OwnerIdentity, create_token, owner_auth_middleware};
pub use password::{hash_password, verify_password};
