//! Custom Axum extractors.

pub mod request_info;

pub use request_info::RequestInfo;
