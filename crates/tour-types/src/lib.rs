#![allow(non_snake_case)]

pub mod booking;
pub mod catalog;
pub mod content;
pub mod session;

pub use booking::*;
pub use catalog::*;
pub use content::*;
pub use session::*;
