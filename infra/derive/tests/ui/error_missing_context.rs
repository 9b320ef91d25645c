use lmarc_derive::lmarc_error;

#[lmarc_error]
pub enum ProbeError {
    #[error("Probe I/O failure: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

fn main() {}
