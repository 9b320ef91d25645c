use std::borrow::Cow;

/// Error types specific to the benchmark feature.
///
/// Failed prompts are recorded in the results, not raised; these cover what stops a
/// run before it starts.
#[lmarc_derive::lmarc_error]
pub enum BenchError {
    /// The model-serving tool is not installed or does not respond to `--version`.
    #[error("Ollama not available{}: {message}", format_context(.context))]
    OllamaMissing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Model listing failed{}: {message}", format_context(.context))]
    NoModels { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal benchmark error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
