use lmarc_derive::lmarc_error;
use std::borrow::Cow;

#[lmarc_error]
pub enum ProbeError {
    #[error("Probe I/O failure{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal probe error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {}
