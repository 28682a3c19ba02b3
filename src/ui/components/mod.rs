pub mod code_area;
pub mod console_pane;
pub mod doc_pane;
pub mod editor_area;
pub mod info_banner;
pub mod pager_bar;
pub mod setting_toggle;
