pub mod api_utils;
pub mod expr;
pub mod icons;
pub mod markup;
pub mod storage;
pub mod theme;
pub mod time;
pub mod toast;
