//! Users, sessions and authentication, kept entirely in memory.

pub mod auth;
pub mod error;
pub mod session;
pub mod store;
pub mod user;

pub use auth::AuthService;
pub use error::{ModelError, Result};
pub use session::{Session, SessionStore, SessionToken};
pub use store::UserStore;
pub use user::{Credentials, NewUser, User, UserPatch};
