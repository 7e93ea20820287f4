pub mod config;
pub mod logging;

pub mod acquire;
pub mod catalog;
pub mod checksum;
pub mod detect;
pub mod negotiate;
pub mod storage;
pub mod transport;
