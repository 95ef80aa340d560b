pub mod articles;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod password;
pub mod profile;
pub mod tour_detail;
pub mod unauthorized;
