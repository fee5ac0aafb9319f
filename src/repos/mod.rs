pub mod error;
pub mod factory;
pub mod user_repo;

pub use factory::build_user_repo;
pub use user_repo::{InMemoryUserRepo, PgUserRepo, User, UserRepo};
