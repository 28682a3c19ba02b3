pub mod banner;
pub mod console;
pub mod controller;
pub mod surface;
