// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn spec(argument: &str) -> ContainerSpec {
    ContainerSpec {
        image: "img:1".to_string(),
        mounts: vec![],
        command: vec!["notebook".to_string(), argument.to_string()],
    }
}

#[tokio::test]
async fn fake_container_lifecycle() {
    let adapter = FakeContainerAdapter::new();
    adapter.script("a.ipynb", b"running\n", 1);

    let id = adapter.start(&spec("a.ipynb")).await.unwrap();
    let log = LogTee::console(false);
    adapter.stream_logs(&id, &log).await.unwrap();
    log.finish().await.unwrap();

    assert_eq!(adapter.wait(&id).await.unwrap(), 1);
    assert_eq!(adapter.live_containers().len(), 1);
    adapter.remove(&id).await.unwrap();
    assert!(adapter.live_containers().is_empty());
}

#[tokio::test]
async fn fake_images_are_tracked() {
    let adapter = FakeContainerAdapter::new();
    assert!(!adapter.image_exists("img:1").await.unwrap());
    adapter.add_image("img:1");
    assert!(adapter.image_exists("img:1").await.unwrap());
}

#[tokio::test]
async fn fake_start_failure_creates_no_container() {
    let adapter = FakeContainerAdapter::new();
    adapter.fail_start("b.ipynb");

    assert!(adapter.start(&spec("b.ipynb")).await.is_err());
    assert!(adapter.containers().is_empty());
}
