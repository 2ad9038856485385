use relay_core::TransferUnit;
use relay_infra::estimate;
use std::fs;

#[test]
fn directory_total_includes_nested_entries() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(dir.path().join("a.bin"), vec![1u8; 1000]).unwrap();
    fs::write(nested.join("b.bin"), vec![2u8; 2500]).unwrap();

    let nested_len = fs::metadata(&nested).unwrap().len();
    let expected = (1000 + 2500 + nested_len) as f64;

    assert_eq!(estimate(dir.path(), TransferUnit::Bytes).unwrap(), expected);
}

#[test]
fn directory_total_rounds_to_whole_megabytes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("big.bin"), vec![0u8; 2_600_000]).unwrap();

    assert_eq!(estimate(dir.path(), TransferUnit::Megabytes).unwrap(), 3.0);
}

#[test]
fn empty_directory_is_zero() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(estimate(dir.path(), TransferUnit::Bytes).unwrap(), 0.0);
}

#[test]
fn missing_top_level_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = estimate(&dir.path().join("absent"), TransferUnit::Bytes).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[cfg(unix)]
#[test]
fn dangling_symlink_counts_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.bin"), vec![1u8; 1000]).unwrap();
    std::os::unix::fs::symlink(dir.path().join("removed.bin"), dir.path().join("link")).unwrap();

    assert_eq!(estimate(dir.path(), TransferUnit::Bytes).unwrap(), 1000.0);
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_does_not_fail_the_walk() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.bin"), vec![1u8; 1000]).unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    let locked_len = fs::metadata(&locked).unwrap().len();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let result = estimate(dir.path(), TransferUnit::Bytes);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(result.unwrap(), (1000 + locked_len) as f64);
}
