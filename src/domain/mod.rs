pub mod pull;
pub mod users;
