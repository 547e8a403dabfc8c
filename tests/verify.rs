use std::io::Write as _;
use std::path::Path;

use fixsnap::report::Palette;
use fixsnap::ContentVerifier;

const ACTUAL: &str = "actual.txt";
const EXPECTED: &str = "expected.txt";

fn verifier(dir: &Path) -> ContentVerifier {
    ContentVerifier::use_directory(dir).palette(Palette::never())
}

#[test]
fn missing_expected_saves_actual() {
    let temp = tempfile::tempdir().unwrap();

    let err = verifier(temp.path())
        .save_actual_as(ACTUAL, |w| w.write_all(b"actual file content"))
        .read_expected_as(EXPECTED, fixsnap::deserialize::text)
        .verify(|_expected| panic!("never reached"))
        .unwrap_err();

    let fixsnap::Error::ExpectedFileNotFound(missing) = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(missing.expected_path(), temp.path().join(EXPECTED));
    assert_eq!(missing.actual_path(), temp.path().join(ACTUAL));
    assert!(err.is_mismatch());
    let message = err.to_string();
    assert!(message.contains("<view diff>"), "{message}");
    assert!(message.contains("<accept diff>"), "{message}");
    assert_eq!(
        std::fs::read_to_string(temp.path().join(ACTUAL)).unwrap(),
        "actual file content"
    );
}

#[test]
fn failing_assertion_saves_actual_and_panics() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join(EXPECTED), "expected content").unwrap();
    let actual = "actual file content";

    let result = std::panic::catch_unwind(|| {
        verifier(temp.path())
            .save_actual_as(ACTUAL, |w| w.write_all(actual.as_bytes()))
            .read_expected_as(EXPECTED, fixsnap::deserialize::text)
            .verify(|expected| assert_eq!(expected, actual, "contents differ"))
    });

    let payload = result.unwrap_err();
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .unwrap_or_default();
    assert!(message.contains("contents differ"), "{message}");
    assert_eq!(
        std::fs::read_to_string(temp.path().join(ACTUAL)).unwrap(),
        actual
    );
}

#[test]
fn passing_assertion_saves_nothing() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join(EXPECTED), "good content").unwrap();

    verifier(temp.path())
        .save_actual_as(ACTUAL, |w| w.write_all(b"good content"))
        .read_expected_as(EXPECTED, fixsnap::deserialize::text)
        .verify(|expected| assert_eq!(expected, "good content"))
        .unwrap();

    assert!(!temp.path().join(ACTUAL).exists());
}

#[test]
fn actual_replaces_older_one() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join(EXPECTED), "good content").unwrap();
    std::fs::write(
        temp.path().join(ACTUAL),
        "old looooooooooooooooooooooooooooong actual",
    )
    .unwrap();

    let result = std::panic::catch_unwind(|| {
        verifier(temp.path())
            .save_actual_as(ACTUAL, |w| w.write_all(b"new short actual"))
            .read_expected_as(EXPECTED, fixsnap::deserialize::text)
            .verify(|_expected| panic!("rejected"))
    });

    assert!(result.is_err());
    assert_eq!(
        std::fs::read_to_string(temp.path().join(ACTUAL)).unwrap(),
        "new short actual"
    );
}

#[test]
fn try_verify_reports_failure() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join(EXPECTED), "1,2,3").unwrap();

    let err = verifier(temp.path())
        .save_actual_as(ACTUAL, |w| w.write_all(b"1,2"))
        .read_expected_as(EXPECTED, fixsnap::deserialize::text)
        .try_verify(|expected| {
            if expected == "1,2" {
                Ok(())
            } else {
                Err(format!("expected `{expected}`, got `1,2`"))
            }
        })
        .unwrap_err();

    let fixsnap::Error::VerificationFailed(failure) = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(failure.source().to_string(), "expected `1,2,3`, got `1,2`");
    assert_eq!(failure.actual_path(), temp.path().join(ACTUAL));
    let message = err.to_string();
    assert!(message.starts_with("Verification failed:\n"), "{message}");
    assert!(message.contains("<view directory>"), "{message}");
    assert!(message.contains("<accept diff>"), "{message}");
    assert_eq!(std::fs::read_to_string(temp.path().join(ACTUAL)).unwrap(), "1,2");
}

#[test]
fn try_verify_passes() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join(EXPECTED), "same").unwrap();

    verifier(temp.path())
        .save_actual_as(ACTUAL, |w| w.write_all(b"same"))
        .read_expected_as(EXPECTED, fixsnap::deserialize::text)
        .try_verify(|expected| {
            if expected == "same" {
                Ok(())
            } else {
                Err("differs")
            }
        })
        .unwrap();

    assert!(!temp.path().join(ACTUAL).exists());
}

#[test]
fn missing_directory() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("missing");

    let err = verifier(&missing)
        .save_actual_as(ACTUAL, |w| w.write_all(b"x"))
        .read_expected_as(EXPECTED, fixsnap::deserialize::text)
        .verify(|_expected| {})
        .unwrap_err();

    assert!(matches!(err, fixsnap::Error::DirectoryNotFound(_)), "{err}");
    assert!(!missing.exists());
}
