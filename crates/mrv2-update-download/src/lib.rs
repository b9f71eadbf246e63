//! Release-asset downloader for the mrv2 self-updater.
//!
//! Streams an HTTP body into the temp directory, reports throttled progress
//! and refuses to hand back a file that is shorter than advertised.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod config;
mod downloader;
mod throttle;

pub use config::DownloaderConfig;
pub use downloader::ReqwestDownloader;
pub use throttle::ProgressThrottle;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use wiremock as _;
