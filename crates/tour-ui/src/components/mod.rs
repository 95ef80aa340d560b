pub mod banner_strip;
pub mod nav;
pub mod status;
pub mod toast;
pub mod tour_card;
