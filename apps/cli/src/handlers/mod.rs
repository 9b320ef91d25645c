pub mod archive;
pub mod bench;
pub mod report;
pub mod snapshot;
