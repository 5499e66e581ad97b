use std::time::Duration;

use serde_json::json;

use crate::*;

/// Register, list, then watch the entry fall out after its TTL.
#[tokio::test]
async fn test_register_list_and_expire() -> Result<()> {
    let server = spawn_server(Duration::from_secs(2)).await?;

    let (status, body) = register(&server, "10.0.0.1:4000", "abc").await?;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"status": "ok"}));

    assert_eq!(peers(&server).await?, vec!["10.0.0.1:4000"]);

    tokio::time::sleep(Duration::from_millis(3500)).await;
    assert!(peers(&server).await?.is_empty(), "expired peer still listed");
    Ok(())
}

#[tokio::test]
async fn test_peers_listed_in_registration_order() -> Result<()> {
    let server = spawn_server(Duration::from_secs(25)).await?;

    register(&server, "a1", "s1").await?;
    register(&server, "a2", "s2").await?;
    register(&server, "a3", "s3").await?;

    assert_eq!(peers(&server).await?, vec!["a1", "a2", "a3"]);
    Ok(())
}

#[tokio::test]
async fn test_re_registration_refreshes_instead_of_appending() -> Result<()> {
    let server = spawn_server(Duration::from_secs(25)).await?;

    register(&server, "addrA", "s1").await?;
    register(&server, "addrA", "s1").await?;
    assert_eq!(peers(&server).await?, vec!["addrA"]);

    register(&server, "addrB", "s1").await?;
    assert_eq!(peers(&server).await?, vec!["addrB"]);
    assert_eq!(server.registry.tracked_count()?, 1);
    Ok(())
}

#[tokio::test]
async fn test_refresh_keeps_peer_alive_past_first_deadline() -> Result<()> {
    let server = spawn_server(Duration::from_secs(3)).await?;

    // Each sleep leaves a second of slack on the TTL; together they outlast it.
    register(&server, "addrA", "s1").await?;
    tokio::time::sleep(Duration::from_secs(2)).await;
    register(&server, "addrA", "s1").await?;
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(peers(&server).await?, vec!["addrA"]);
    Ok(())
}

#[tokio::test]
async fn test_new_session_sweeps_expired_ones() -> Result<()> {
    let server = spawn_server(Duration::from_secs(2)).await?;

    register(&server, "addrA", "s1").await?;
    tokio::time::sleep(Duration::from_millis(3500)).await;
    register(&server, "addrB", "s2").await?;

    assert_eq!(peers(&server).await?, vec!["addrB"]);
    assert_eq!(server.registry.tracked_count()?, 1);
    Ok(())
}

#[tokio::test]
async fn test_invalid_registration_is_rejected_and_harmless() -> Result<()> {
    let server = spawn_server(Duration::from_secs(25)).await?;
    register(&server, "addrA", "s1").await?;

    for body in [
        json!({"address": "", "sessionId": "s2"}),
        json!({"address": "addrB", "sessionId": ""}),
        json!({"address": "addrB"}),
        json!({}),
    ] {
        let (status, resp) = post(&server, &body).await?;
        assert_eq!(status, 400, "body {body} should be rejected");
        assert_eq!(resp, json!({"error": "require address,sessionId"}));
    }

    assert_eq!(peers(&server).await?, vec!["addrA"]);
    Ok(())
}
