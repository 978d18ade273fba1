use dirsync_fs::RelPath;
use proptest::prelude::*;
use rstest::rstest;
use std::path::Path;

#[rstest]
#[case("foo/bar/baz", "foo/bar/baz")]
#[case("foo\\bar\\baz", "foo/bar/baz")]
#[case("foo/bar\\baz", "foo/bar/baz")]
#[case("./foo//bar/", "foo/bar")]
#[case("", "")]
fn test_normalize(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(RelPath::new(input).as_str(), expected);
}

#[test]
fn test_join_paths() {
    let base = RelPath::new("foo/bar");
    assert_eq!(base.join("baz").as_str(), "foo/bar/baz");
}

#[test]
fn test_parent() {
    let path = RelPath::new("foo/bar/baz");
    assert_eq!(path.parent().unwrap().as_str(), "foo/bar");
}

#[test]
fn test_file_name() {
    let path = RelPath::new("foo/bar/baz.txt");
    assert_eq!(path.file_name(), Some("baz.txt"));
}

#[test]
fn test_depth() {
    assert_eq!(RelPath::new("a").depth(), 1);
    assert_eq!(RelPath::new("a/b/c").depth(), 3);
}

#[test]
fn test_from_components_drops_root_and_dots() {
    let path = RelPath::from_components(Path::new("/a/./b/../c"));
    assert_eq!(path.as_str(), "a/b/c");
}

#[test]
fn test_display_matches_as_str() {
    let path = RelPath::new("a/b");
    assert_eq!(path.to_string(), "a/b");
}

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = RelPath::new(&s);
        let as_str = path.as_str();

        prop_assert!(!as_str.contains('\\'));
        prop_assert!(!as_str.contains("//"));
        prop_assert!(!as_str.starts_with('/'));
        prop_assert!(!as_str.ends_with('/'));

        // Normalizing twice changes nothing
        prop_assert_eq!(RelPath::new(as_str), path.clone());
    }

    #[test]
    fn test_join_then_parent(a in "[a-z]{1,8}(/[a-z]{1,8}){0,3}", b in "[a-z]{1,8}") {
        let base = RelPath::new(&a);
        let joined = base.join(&b);

        prop_assert_eq!(joined.parent(), Some(base));
        prop_assert_eq!(joined.file_name(), Some(b.as_str()));
    }
}
