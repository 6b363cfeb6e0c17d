//! QR Code Generation
//!
//! 桌台二维码生成与生命周期管理
//!
//! [`generator`] turns a URL into a printable PNG data URL; [`service`]
//! owns the one-record-per-table lifecycle on top of the repository.

pub mod generator;
pub mod service;
