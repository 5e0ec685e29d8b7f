//! UIコンポーネント

pub mod api_key_modal;
pub mod header;
pub mod progress_bar;
pub mod results_gallery;
pub mod swipe_card;
pub mod upload_area;
