pub mod api;
pub mod errors;
pub mod model;
pub mod store;
pub mod stream;
pub mod ui;
