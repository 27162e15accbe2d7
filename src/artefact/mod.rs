//! Installer archive acquisition.
//!
//! Covers the transport and unpacking halves of fetching a version's
//! installers: [`download`] retrieves the ZIP archive named by the
//! manifest, and [`extract`] unpacks it into a scratch directory.

pub mod download;
pub mod extract;
