//! Data models shared by the client and the server.

mod session;
mod user;

pub use session::Session;
pub use user::{avatar_src, SessionUser, ALLOWED_IMAGE_HOSTS};
