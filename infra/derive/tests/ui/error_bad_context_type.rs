use lmarc_derive::lmarc_error;

#[lmarc_error]
pub enum ProbeError {
    #[error("Probe I/O failure: {source}")]
    Io { source: std::io::Error, context: Option<String> },
}

fn main() {}
