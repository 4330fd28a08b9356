//! Presentation Layer
//!
//! RPC handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::RpcState;
pub use router::{IS_ADMIN_PATH, LOGIN_PATH, REGISTER_PATH, auth_router, rpc_router};
