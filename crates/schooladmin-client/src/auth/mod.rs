//! Login gate: GraphQL login, logout, and the signed-in check.

pub mod gate;
pub mod input;
pub mod token;

pub use gate::{ACCESS_DENIED_MESSAGE, AuthGate, LOGIN_FAILED_MESSAGE};
pub use input::LoginInput;
pub use token::{is_expired, token_expiry};
