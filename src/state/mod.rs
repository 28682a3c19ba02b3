pub mod content;
pub mod pager;
pub mod setting;
