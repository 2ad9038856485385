use camino::Utf8PathBuf;
use relay_core::RelayError;
use relay_infra::{BinaryLocator, LocatorConfig, PathPrompt};
use std::io;

struct Scripted(Option<String>);

impl PathPrompt for Scripted {
    fn ask(&mut self, _question: &str) -> io::Result<String> {
        self.0
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more answers"))
    }
}

fn config(dir: &tempfile::TempDir) -> LocatorConfig {
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    LocatorConfig {
        // Never present on any search path.
        program: "relay-test-no-such-binary".to_string(),
        location_file: root.join(".relayrc"),
    }
}

#[test]
fn prompted_location_is_persisted_then_reused() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir);
    let binary = dir.path().join("rclone");
    std::fs::write(&binary, "").unwrap();
    let binary = binary.to_str().unwrap().to_string();

    let mut first = BinaryLocator::with_prompt(cfg.clone(), Scripted(Some(binary.clone())));
    assert_eq!(first.locate(None).unwrap(), binary.as_str());
    assert_eq!(
        std::fs::read_to_string(&cfg.location_file).unwrap(),
        binary
    );

    let mut second = BinaryLocator::with_prompt(cfg, Scripted(None));
    assert_eq!(second.locate(None).unwrap(), binary.as_str());
}

#[test]
fn nonexistent_prompted_path_is_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir);

    let mut locator =
        BinaryLocator::with_prompt(cfg.clone(), Scripted(Some("/no/such/rclone".into())));
    let err = locator.locate(None).unwrap_err();
    assert!(matches!(err, RelayError::BinaryNotFound(_)));
    assert!(!cfg.location_file.exists());
}

#[test]
fn explicit_location_skips_everything_else() {
    let dir = tempfile::tempdir().unwrap();
    let mut locator = BinaryLocator::with_prompt(config(&dir), Scripted(None));
    assert_eq!(locator.locate(Some("/custom/rclone")).unwrap(), "/custom/rclone");
}
