pub mod composer;
pub mod message;
pub mod page;
