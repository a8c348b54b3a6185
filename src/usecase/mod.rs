pub mod classify;
pub mod filter;
pub mod message;
