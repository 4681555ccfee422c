pub mod artifact;
pub mod chat;
