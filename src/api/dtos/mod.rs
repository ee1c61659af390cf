pub mod account_dto;
pub mod auth_dto;
pub mod common;

pub use account_dto::*;
pub use auth_dto::*;
pub use common::*;
