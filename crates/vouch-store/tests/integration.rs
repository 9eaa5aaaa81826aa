use std::sync::Arc;

use tempfile::tempdir;
use vouch_store::{ArtifactKey, ArtifactResolver, CachedResolver, FsArtifactStore, ResolveError};

fn write_artifact(root: &std::path::Path, kind: &str, file: &str, content: &str) {
    std::fs::create_dir_all(root.join(kind)).unwrap();
    std::fs::write(root.join(kind).join(file), content).unwrap();
}

#[tokio::test]
async fn test_fs_store_reads_exact_bytes() {
    let dir = tempdir().unwrap();
    let content = "{\n  \"schema\": 1,\n  \"assets\": [\"a\", \"b\"]\n}\n";
    write_artifact(dir.path(), "core", "1.0.0.json", content);

    let store = FsArtifactStore::new(dir.path());
    let key = ArtifactKey::new("core", "1.0.0").unwrap();

    assert_eq!(&store.resolve(&key).await.unwrap()[..], content.as_bytes());
}

#[tokio::test]
async fn test_custom_extension() {
    let dir = tempdir().unwrap();
    write_artifact(dir.path(), "maps", "7.bin", "binary-ish");

    let store = FsArtifactStore::new(dir.path()).extension("bin");
    let key = ArtifactKey::new("maps", "7").unwrap();

    assert_eq!(&store.resolve(&key).await.unwrap()[..], b"binary-ish");
}

#[tokio::test]
async fn test_not_found_carries_key() {
    let dir = tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path());
    let key = ArtifactKey::new("core", "2.0.0").unwrap();

    match store.resolve(&key).await {
        Err(ResolveError::NotFound { key: missing }) => assert_eq!(missing, key),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cached_fs_store_picks_up_replacement_after_invalidate() {
    let dir = tempdir().unwrap();
    write_artifact(dir.path(), "core", "1.0.0.json", "first");

    let cache = CachedResolver::new(FsArtifactStore::new(dir.path()));
    let key = ArtifactKey::new("core", "1.0.0").unwrap();

    assert_eq!(&cache.resolve(&key).await.unwrap()[..], b"first");

    write_artifact(dir.path(), "core", "1.0.0.json", "second");
    assert_eq!(&cache.resolve(&key).await.unwrap()[..], b"first");

    cache.invalidate(&key);
    assert_eq!(&cache.resolve(&key).await.unwrap()[..], b"second");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolution() {
    let dir = tempdir().unwrap();
    for version in 0..8 {
        write_artifact(dir.path(), "core", &format!("{version}.json"), &format!("v{version}"));
    }

    let store = Arc::new(FsArtifactStore::new(dir.path()));
    let mut handles = Vec::new();
    for round in 0..32 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let version = round % 8;
            let key = ArtifactKey::new("core", version.to_string()).unwrap();
            let bytes = store.resolve(&key).await.unwrap();
            assert_eq!(bytes, format!("v{version}").into_bytes());
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }
}
