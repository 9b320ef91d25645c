use lmarc_logger::{LevelFilter, Logger, LoggerError};

#[test]
fn second_init_returns_subscriber_error() {
    let logger = Logger::builder()
        .name("lmarc-init-twice")
        .level(LevelFilter::WARN)
        .init()
        .expect("first init should succeed");
    assert!(!logger.writes_files(), "console-only logger should not hold a file guard");

    let err = Logger::builder()
        .name("lmarc-init-twice-second")
        .init()
        .expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
