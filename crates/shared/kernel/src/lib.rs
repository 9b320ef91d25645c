//! Kernel utilities shared by the archive apps.
//! Keep this crate lightweight; it re-exports the domain and owns configuration loading.
//!
//! ```rust,no_run
//! use lmarc_kernel::config::load_archive_config;
//!
//! let config = load_archive_config(None::<&str>).unwrap();
//! println!("archive root: {}", config.archive.root.display());
//! ```

pub mod config;

pub use lmarc_domain as domain;
