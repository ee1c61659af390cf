mod account_repository;
mod session_repository;
mod traits;

pub use account_repository::AccountRepositoryImpl;
pub use session_repository::SessionRepositoryImpl;
pub use traits::{AccountRepository, SessionRepository};
