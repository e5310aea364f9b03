pub mod controller;
pub mod error;
pub mod handler;
pub mod response;
