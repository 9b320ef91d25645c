use std::borrow::Cow;

/// Error types specific to the inventory feature.
#[lmarc_derive::lmarc_error]
pub enum InventoryError {
    /// `ollama list` could not be run or exited non-zero.
    #[error("Model listing failed{}: {source}", format_context(.context))]
    Listing { source: lmarc_process::ProcessError, context: Option<Cow<'static, str>> },

    /// A stored snapshot has no readable model table.
    #[error("Unreadable model snapshot{}: {message}", format_context(.context))]
    Snapshot { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal inventory error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
