use std::borrow::Cow;

#[lmarc_derive::lmarc_error]
pub enum ProcessError {
    /// The program is not installed or not on `PATH`.
    #[error("Program not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Process I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The program ran longer than its timeout and was killed.
    #[error("Timeout{}: {message}", format_context(.context))]
    Timeout { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The program exited with a non-zero status.
    #[error("Command failed{}: {message}", format_context(.context))]
    Failed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ProcessError {
    #[must_use]
    pub fn timeout(program: &str, limit: std::time::Duration) -> Self {
        Self::Timeout { message: format!("{program} exceeded {limit:?}").into(), context: None }
    }

    #[must_use]
    pub fn not_found(program: &str) -> Self {
        Self::NotFound { message: program.to_owned().into(), context: None }
    }
}
