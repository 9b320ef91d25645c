use std::borrow::Cow;

/// A specialized [`ArchiveError`] enum of this crate.
#[lmarc_derive::lmarc_error]
pub enum ArchiveError {
    /// Snapshots are immutable once written.
    #[error("Snapshot already exists{}: {message}", format_context(.context))]
    AlreadyExists { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Snapshot not found{}: {message}", format_context(.context))]
    SnapshotNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Archive I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Snapshot JSON error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal archive error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
