use std::borrow::Cow;

/// Error types specific to the hardware feature.
///
/// Missing tools and failing probes are recorded as notes in the snapshot, so the
/// only failure left is the host collection itself.
#[lmarc_derive::lmarc_error]
pub enum HardwareError {
    #[error("Host fact collection failed{}: {message}", format_context(.context))]
    Collection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal hardware error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
