use lmarc_derive::lmarc_error;
use std::borrow::Cow;

#[lmarc_error]
pub enum SnapshotError {
    #[error("Snapshot I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Snapshot missing{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal snapshot error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<String, SnapshotError> {
    Ok(std::fs::read_to_string("/definitely/not/here/models-2024-01-01.md")?)
}

#[test]
fn question_mark_converts_source_without_context() {
    let err = read_missing().unwrap_err();
    assert!(matches!(err, SnapshotError::Io { context: None, .. }));
    assert!(err.to_string().starts_with("Snapshot I/O failure: "));
}

#[test]
fn context_is_attached_to_source_results() {
    let err = std::fs::read_to_string("/definitely/not/here")
        .context("Reading inventory")
        .unwrap_err();
    assert!(err.to_string().starts_with("Snapshot I/O failure (Reading inventory): "));
}

#[test]
fn context_overrides_on_own_results() {
    let result: Result<(), SnapshotError> =
        Err(SnapshotError::Missing { message: "models-2024-01-01.md".into(), context: None });
    let err = result.context("Comparing snapshots").unwrap_err();
    assert_eq!(err.to_string(), "Snapshot missing (Comparing snapshots): models-2024-01-01.md");
}

#[test]
fn strings_become_internal_errors() {
    let from_static: SnapshotError = "broken invariant".into();
    let from_owned: SnapshotError = format!("bad date {}", 42).into();
    assert!(matches!(from_static, SnapshotError::Internal { .. }));
    assert_eq!(from_owned.to_string(), "Internal snapshot error: bad date 42");
}
