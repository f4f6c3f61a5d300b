pub mod calendar;
pub mod config;
pub mod feed;
pub mod local_guide;
pub mod proxy;
pub mod tracing;
