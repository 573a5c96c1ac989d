//! Integration tests for path-based filesystem operations.
//!
//! Exercises the public API end to end: creation one level at a time,
//! whole-content writes, deletion with and without recursion, and search.

use ramfs_core::{FsConfig, FsError, NodeKind, RamFs, RamFsBuilder, Resolution};

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_public_types_are_send_sync() {
    assert_send_sync::<RamFs>();
    assert_send_sync::<FsError>();
    assert_send_sync::<FsConfig>();
}

#[test]
fn test_find_example_session() {
    let mut fs = RamFs::new();

    fs.create_dir("/x").unwrap();
    fs.create("/x/y").unwrap();
    assert!(fs.create("/z/y").unwrap_err().is_not_found());
    fs.create_dir("/z").unwrap();
    fs.create("/z/y").unwrap();

    assert_eq!(fs.find("y"), vec!["/x/y", "/z/y"]);
}

#[test]
fn test_write_overwrites() {
    let mut fs = RamFs::new();
    fs.create("/f").unwrap();

    assert_eq!(fs.write("/f", "hello").unwrap(), 5);
    assert_eq!(fs.read("/f").unwrap(), b"hello");
    assert_eq!(fs.write("/f", "hi").unwrap(), 2);
    assert_eq!(fs.read("/f").unwrap(), b"hi");
}

#[test]
fn test_binary_content() {
    let mut fs = RamFs::new();
    fs.create("/bin").unwrap();

    let data: Vec<u8> = (0..=255).collect();
    assert_eq!(fs.write("/bin", data.clone()).unwrap(), 256);
    assert_eq!(fs.read("/bin").unwrap(), data.as_slice());
}

#[test]
fn test_recursive_delete_removes_every_descendant() {
    let mut fs = RamFsBuilder::new()
        .add_dir("/a")
        .add_dir("/a/b")
        .add_dir("/a/b/c")
        .add_file("/a/f1", "1")
        .add_file("/a/b/f2", "2")
        .add_file("/a/b/c/f3", "3")
        .add_file("/outside", "")
        .build()
        .unwrap();
    assert_eq!(fs.node_count(), 8);

    fs.delete_recursive("a").unwrap();

    for path in ["/a", "/a/f1", "/a/b", "/a/b/f2", "/a/b/c", "/a/b/c/f3"] {
        assert!(fs.stat(path).unwrap_err().is_not_found(), "{path}");
    }
    for path in ["/a/f1", "/a/b/f2", "/a/b/c/f3"] {
        assert!(fs.read(path).unwrap_err().is_not_found(), "{path}");
    }
    assert_eq!(fs.node_count(), 2);
    assert!(fs.read("/outside").is_ok());
}

#[test]
fn test_delete_non_empty_then_empty() {
    let mut fs = RamFs::new();
    fs.create_dir("/d").unwrap();
    fs.create("/d/only").unwrap();

    assert!(fs.delete("/d").unwrap_err().is_directory_not_empty());
    fs.delete("/d/only").unwrap();
    fs.delete("/d").unwrap();
    assert_eq!(fs.node_count(), 1);
}

#[test]
fn test_resolution_is_stable() {
    let mut fs = RamFs::new();
    fs.create_dir("/a").unwrap();
    fs.create("/a/b").unwrap();

    let first = fs.resolve("/a/b").unwrap();
    let second = fs.resolve("/a/b").unwrap();
    assert_eq!(first, second);
    assert!(matches!(first, Resolution::Existing(_)));
}

#[test]
fn test_paths_are_normalised() {
    let mut fs = RamFs::new();
    fs.create_dir("a").unwrap();
    fs.create("//a///b/").unwrap();
    fs.write("a/b", "x").unwrap();

    assert_eq!(fs.read("/a/b").unwrap(), b"x");
    assert_eq!(fs.stat("a//b").unwrap().path, "/a/b");
}

#[test]
fn test_error_kinds() {
    let mut fs = RamFs::new();
    fs.create("/f").unwrap();
    fs.create_dir("/d").unwrap();

    assert!(fs.create("/f").unwrap_err().is_already_exists());
    assert!(fs.create("/f/x").unwrap_err().is_invalid_path());
    assert!(fs.create("/m/n/o").unwrap_err().is_not_found());
    assert!(fs.read("/d").unwrap_err().is_kind_mismatch());
    assert!(fs.write("/d", "x").unwrap_err().is_kind_mismatch());
    assert_eq!(fs.delete("/").unwrap_err(), FsError::CannotDeleteRoot);
    assert!(fs.delete("/nope").unwrap_err().is_not_found());
    assert!(fs.delete_recursive("/nope").unwrap_err().is_not_found());

    let long = format!("/{}", "n".repeat(256));
    assert!(matches!(
        fs.create(&long).unwrap_err(),
        FsError::NameTooLong { len: 256, max: 255 }
    ));
}

#[test]
fn test_children_limit_applies_per_directory() {
    let config = FsConfig::builder().max_children(3).build().unwrap();
    let mut fs = RamFs::with_config(config).unwrap();

    for name in ["/a", "/b", "/c"] {
        fs.create_dir(name).unwrap();
    }
    assert!(fs.create("/d").unwrap_err().is_limit_exceeded());

    for name in ["/a/1", "/a/2", "/a/3"] {
        fs.create(name).unwrap();
    }
    assert!(fs.create("/a/4").unwrap_err().is_limit_exceeded());

    fs.delete("/a/1").unwrap();
    fs.create("/a/4").unwrap();
}

#[test]
fn test_many_children_survive_growth_and_deletion() {
    let mut fs = RamFs::new();
    for i in 0..500 {
        fs.create(&format!("/f{i}")).unwrap();
    }
    for i in (0..500).step_by(3) {
        fs.delete(&format!("/f{i}")).unwrap();
    }

    for i in 0..500 {
        let result = fs.read(&format!("/f{i}"));
        if i % 3 == 0 {
            assert!(result.unwrap_err().is_not_found(), "f{i}");
        } else {
            assert!(result.is_ok(), "f{i}");
        }
    }
    assert_eq!(fs.stat("/").unwrap().size, 333);
}

#[test]
fn test_deep_tree() {
    let mut fs = RamFs::new();
    let mut path = String::new();
    for _ in 0..255 {
        path.push_str("/d");
        fs.create_dir(&path).unwrap();
    }

    let info = fs.stat(&path).unwrap();
    assert_eq!(info.depth, 255);
    assert_eq!(info.kind, NodeKind::Directory);

    path.push_str("/f");
    assert!(fs.create(&path).unwrap_err().is_limit_exceeded());
}

#[test]
fn test_clear_then_reuse() {
    let mut fs = RamFsBuilder::new()
        .add_dir("/a")
        .add_file("/a/b", "b")
        .build()
        .unwrap();

    fs.clear();
    assert_eq!(fs.node_count(), 1);
    assert!(fs.find("b").is_empty());

    fs.create_dir("/a").unwrap();
    fs.create("/a/b").unwrap();
    assert_eq!(fs.find("b"), vec!["/a/b"]);
}
