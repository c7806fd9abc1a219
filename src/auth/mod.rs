//! Authentication module
//!
//! Account creation and password verification live in [`credentials`];
//! per-caller session tokens in [`session`].

pub mod credentials;
pub mod handlers;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{Claims, Session, SessionController};
