pub mod factory;
pub mod roles;
pub mod token;

pub use factory::build_token_verifier;
pub use roles::{ValidRoles, is_valid_role};
pub use token::TokenVerifier;
