use std::time::Duration;

use crate::*;

/// Many clients registering distinct sessions at once all end up listed once.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_distinct_registrations() -> Result<()> {
    let server = std::sync::Arc::new(spawn_server(Duration::from_secs(25)).await?);

    let mut tasks = Vec::new();
    for i in 0..32 {
        let server = server.clone();
        tasks.push(tokio::spawn(async move {
            register(&server, &format!("10.0.0.{i}:4000"), &format!("s{i}")).await
        }));
    }
    for t in tasks {
        let (status, _) = t.await??;
        assert_eq!(status, 200);
    }

    let mut listed = peers(&server).await?;
    assert_eq!(listed.len(), 32);
    listed.sort();
    listed.dedup();
    assert_eq!(listed.len(), 32, "duplicate addresses listed");
    Ok(())
}

/// Racing registrations for one session never produce a duplicate entry.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_same_session_registrations() -> Result<()> {
    let server = std::sync::Arc::new(spawn_server(Duration::from_secs(25)).await?);

    let mut tasks = Vec::new();
    for i in 0..32 {
        let server = server.clone();
        tasks.push(tokio::spawn(async move {
            register(&server, &format!("addr-{i}"), "shared").await
        }));
    }
    for t in tasks {
        t.await??;
    }

    let listed = peers(&server).await?;
    assert_eq!(listed.len(), 1);
    assert!(listed[0].starts_with("addr-"));
    assert_eq!(server.registry.tracked_count()?, 1);
    Ok(())
}
