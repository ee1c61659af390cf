pub mod account;
pub mod errors;
pub mod session;

pub use account::{Account, NewAccount, Role, SocialIds};
pub use errors::DomainError;
pub use session::Session;
