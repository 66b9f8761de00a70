mod common;

use std::path::PathBuf;
use std::time::Duration;

use common::{fixture_dir, write_file};
use foldserve::files::resolver::{extension_of, sanitize};
use foldserve::files::{NameIndex, PathResolver, ResolveError};

#[test]
fn test_sanitize_rejects_parent_segments() {
    for path in ["../etc/passwd", "a/../b", "docs/../../x", "....//x"] {
        assert!(
            matches!(sanitize(path), Err(ResolveError::Traversal(_))),
            "{path} should be rejected"
        );
    }
}

#[test]
fn test_sanitize_rejects_leading_slash() {
    assert!(matches!(sanitize("/etc/passwd"), Err(ResolveError::Traversal(_))));
}

#[test]
fn test_sanitize_is_a_substring_check_only() {
    assert_eq!(sanitize("index.html"), Ok("index.html"));
    assert_eq!(sanitize("docs/.."), Ok("docs/.."));
    assert_eq!(sanitize("..\\secret"), Ok("..\\secret"));
    assert_eq!(sanitize("a..b.txt"), Ok("a..b.txt"));
}

#[test]
fn test_extension_of() {
    assert_eq!(extension_of("index.html"), "html");
    assert_eq!(extension_of("archive.tar.gz"), "gz");
    assert_eq!(extension_of("README"), "");
    assert_eq!(extension_of(".profile"), "");
    assert_eq!(extension_of(".hidden.txt"), "txt");
    assert_eq!(extension_of("trailing."), "");
}

#[tokio::test]
async fn test_resolve_exact_name() {
    let dir = fixture_dir("exact");
    write_file(&dir, "index.html", b"<h1>hi</h1>");
    let resolver = PathResolver::new(&dir, &dir, None);

    let target = resolver.resolve("index.html").await.unwrap();

    assert_eq!(target.extension, "html");
    assert_eq!(
        target.absolute_path,
        std::fs::canonicalize(&dir).unwrap().join("index.html")
    );
}

#[tokio::test]
async fn test_resolve_any_case_permutation() {
    let dir = fixture_dir("case");
    write_file(&dir, "index.html", b"x");
    let resolver = PathResolver::new(&dir, &dir, None);

    for requested in ["INDEX.HTML", "Index.Html", "iNdEx.hTmL"] {
        let target = resolver.resolve(requested).await.unwrap();
        assert_eq!(target.absolute_path.file_name().unwrap(), "index.html");
    }
}

#[tokio::test]
async fn test_resolve_extension_comes_from_disk_name() {
    let dir = fixture_dir("ext");
    write_file(&dir, "Photo.JPG", b"x");
    let resolver = PathResolver::new(&dir, &dir, None);

    let target = resolver.resolve("photo.jpg").await.unwrap();
    assert_eq!(target.extension, "JPG");
}

#[tokio::test]
async fn test_resolve_missing_file() {
    let dir = fixture_dir("missing");
    let resolver = PathResolver::new(&dir, &dir, None);

    assert_eq!(
        resolver.resolve("missing.png").await,
        Err(ResolveError::NotFound("missing.png".to_string()))
    );
}

#[tokio::test]
async fn test_resolve_rejects_traversal_before_lookup() {
    let dir = fixture_dir("traversal");
    write_file(&dir, "passwd", b"x");
    let resolver = PathResolver::new(&dir, &dir, None);

    assert!(matches!(
        resolver.resolve("../etc/passwd").await,
        Err(ResolveError::Traversal(_))
    ));
}

#[tokio::test]
async fn test_resolve_only_scans_lookup_dir() {
    let root = fixture_dir("nested-root");
    std::fs::create_dir_all(root.join("docs")).unwrap();
    write_file(&root.join("docs"), "guide.txt", b"nested");
    let resolver = PathResolver::new(&root, &root, None);

    // Subdirectory entries are never searched
    assert!(matches!(
        resolver.resolve("docs/guide.txt").await,
        Err(ResolveError::NotFound(_))
    ));

    // Only the basename is matched, against the lookup dir
    write_file(&root, "GUIDE.txt", b"top");
    let target = resolver.resolve("docs/guide.txt").await.unwrap();
    assert_eq!(target.absolute_path.file_name().unwrap(), "GUIDE.txt");
}

#[tokio::test]
async fn test_resolve_missing_lookup_dir_is_not_found() {
    let resolver = PathResolver::new("/nonexistent-root", "/nonexistent-foldserve-dir", None);

    assert!(matches!(
        resolver.resolve("index.html").await,
        Err(ResolveError::NotFound(_))
    ));
}

#[test]
fn test_resolver_accessors() {
    let dir = fixture_dir("accessors");
    let resolver = PathResolver::new("/srv/www", &dir, None);

    assert_eq!(resolver.root(), PathBuf::from("/srv/www").as_path());
    assert_eq!(resolver.lookup_dir(), std::fs::canonicalize(&dir).unwrap().as_path());
}

#[tokio::test]
async fn test_name_index_rescans_without_ttl() {
    let dir = fixture_dir("index-rescan");
    let index = NameIndex::new(&dir, None);

    assert_eq!(index.find("late.txt").await.unwrap(), None);
    write_file(&dir, "Late.txt", b"x");
    assert_eq!(index.find("late.txt").await.unwrap(), Some("Late.txt".to_string()));
}

#[tokio::test]
async fn test_name_index_reuses_listing_within_ttl() {
    let dir = fixture_dir("index-ttl");
    let index = NameIndex::new(&dir, Some(Duration::from_secs(3600)));

    assert_eq!(index.find("late.txt").await.unwrap(), None);
    write_file(&dir, "late.txt", b"x");
    assert_eq!(index.find("late.txt").await.unwrap(), None);
}

#[tokio::test]
async fn test_name_index_refreshes_after_ttl() {
    let dir = fixture_dir("index-expiry");
    let index = NameIndex::new(&dir, Some(Duration::from_millis(20)));

    assert_eq!(index.find("late.txt").await.unwrap(), None);
    write_file(&dir, "late.txt", b"x");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(index.find("LATE.TXT").await.unwrap(), Some("late.txt".to_string()));
}

#[tokio::test]
async fn test_name_index_missing_dir_errors() {
    let index = NameIndex::new("/nonexistent-foldserve-dir", None);
    assert!(index.find("x").await.is_err());
}
