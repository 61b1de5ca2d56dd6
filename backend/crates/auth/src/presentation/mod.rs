//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{SsoAppState, SsoStore};
pub use router::{sso_router, sso_router_generic};
