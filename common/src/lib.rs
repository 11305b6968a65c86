//! Domain types shared between the scanning engine and its front ends.

pub mod config;
pub mod error;
pub mod network;
pub mod report;
