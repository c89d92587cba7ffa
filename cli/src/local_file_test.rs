use super::*;

#[test]
fn content_type_follows_extension() {
    assert_eq!(LocalFile::new("leaf.jpg").mime_type(), "image/jpeg");
    assert_eq!(LocalFile::new("leaf.PNG").mime_type(), "image/png");
    assert_eq!(LocalFile::new("notes.txt").mime_type(), "text/plain");
    assert_eq!(LocalFile::new("no_extension").mime_type(), "application/octet-stream");
}

#[test]
fn name_is_the_final_path_component() {
    assert_eq!(LocalFile::new("/tmp/scans/leaf.jpg").name(), "leaf.jpg");
}

#[tokio::test]
async fn reads_bytes_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("leaf.png");
    std::fs::write(&path, b"png").expect("write");
    assert_eq!(LocalFile::new(&path).read_bytes().await, Ok(b"png".to_vec()));
}

#[tokio::test]
async fn missing_file_reports_path() {
    let err = LocalFile::new("/definitely/not/here.png").read_bytes().await.expect_err("missing");
    assert!(err.starts_with("/definitely/not/here.png: "));
}
