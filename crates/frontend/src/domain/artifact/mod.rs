pub mod answer;
pub mod api;
pub mod pipeline;
pub mod ui;
