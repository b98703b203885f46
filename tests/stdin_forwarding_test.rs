// Installs the global logger, so this binary holds a single test.
use rask_log_bridge::adapter;
use rask_log_bridge::app::stdin::forward_lines;
use rask_log_bridge::app::{Bridge, BridgeConfig};
use rask_log_bridge::domain::SinkLevel;
use rask_log_bridge::test_support::RecordingSink;
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
#[serial]
async fn test_stdin_lines_reach_sink_through_installed_logger() {
    let sink = Arc::new(RecordingSink::new());
    let bridge = Bridge::new(&BridgeConfig::default(), sink.clone()).unwrap();
    bridge.install_global().unwrap();

    let input: &[u8] =
        b"info worker 3 started\nwarn disk at 91%\ntrace ping\nfatal out of memory\nconnection reset by peer\n";
    let hook = bridge.hook();
    let forwarded = forward_lines(input, hook.as_ref()).await.unwrap();
    assert_eq!(forwarded, 4);

    assert!(sink.wait_for(4, Duration::from_secs(5)).await);
    let snapshot = bridge.shutdown().await.unwrap();
    assert!(snapshot.unrouted >= 1);
    adapter::reset_logger();

    let sent = [
        "worker 3 started",
        "disk at 91%",
        "ping",
        "out of memory",
        "connection reset by peer",
    ];
    let mut records: Vec<_> = sink
        .records()
        .into_iter()
        .filter(|r| sent.contains(&r.message.as_str()))
        .map(|r| (r.message.clone(), r.level, r.pipe()))
        .collect();
    records.sort();

    assert_eq!(
        records,
        vec![
            (
                "connection reset by peer".to_string(),
                SinkLevel::Info,
                "logrusTFLogFire"
            ),
            ("disk at 91%".to_string(), SinkLevel::Warn, "logrusTFLogFire"),
            ("out of memory".to_string(), SinkLevel::Error, "logrusTFLogFire"),
            ("worker 3 started".to_string(), SinkLevel::Info, "logrusTFLogFire"),
        ]
    );
}
