//! End-to-end behavior of the logger through the public API.

use std::sync::Arc;

use rnlog::config::{LoggerConfig, SinkConfig, SinkKind};
use rnlog::{infof, noticef, warnf, Logger, MemorySink, Severity, FALLBACK_LINE};
use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::json;

mod common;

#[test]
fn test_lower_levels_are_suppressed() {
    for (i, threshold) in Severity::ALL.iter().enumerate() {
        let (logger, sink) = common::memory_logger();
        logger.set_threshold(*threshold).unwrap();

        logger.trace("t");
        logger.debug("d");
        logger.info("i");
        logger.warn("w");
        logger.error("e");

        let lines = common::parsed_lines(&sink);
        assert_eq!(lines.len(), 5 - i, "threshold {threshold}");
        assert_eq!(lines[0]["level"], threshold.label());
    }
}

#[test]
fn test_threshold_bounds() {
    let (logger, _sink) = common::memory_logger();
    assert!(logger.set_threshold(Severity::Trace.as_i32()).is_ok());
    assert!(logger.set_threshold(Severity::Error.as_i32()).is_ok());

    let below = logger.set_threshold(Severity::Trace.as_i32() - 1).unwrap_err();
    let above = logger.set_threshold(Severity::Error.as_i32() + 1).unwrap_err();
    assert_eq!(below.to_string(), "invalid log level: -1");
    assert_eq!(above.to_string(), "invalid log level: 5");
}

#[test]
fn test_notice_bypasses_error_threshold() {
    let (logger, sink) = common::memory_logger();
    logger.set_threshold(Severity::Error).unwrap();

    logger.notice("x");
    noticef!(logger, "y{}", 1);

    let lines = common::parsed_lines(&sink);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["level"], "NOTICE");
    assert_eq!(lines[0]["msg"], "x");
}

#[test]
fn test_warnf_without_items() {
    let (logger, sink) = common::memory_logger();
    logger.set_threshold(Severity::Info).unwrap();

    warnf!(logger, "user {} failed", "bob");

    let lines = common::parsed_lines(&sink);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], "WARN");
    assert_eq!(lines[0]["msg"], "user bob failed");
    assert!(lines[0].get("items").is_none());
}

#[test]
fn test_info_item_wire_format() {
    let (logger, sink) = common::memory_logger();
    logger.info_item(&json!({"id": 42}), "loaded");

    let raw = sink.last().unwrap();
    assert!(raw.starts_with(r#"{"time":""#));
    assert!(raw.ends_with(r#"","level":"INFO","msg":"loaded","items":{"id":42}}"#));
    assert!(!raw.contains('\n'));
}

#[test]
fn test_unencodable_items_degrade_silently() {
    struct SelfReferential;
    impl Serialize for SelfReferential {
        fn serialize<S: Serializer>(&self, _s: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("recursion limit"))
        }
    }

    let (logger, sink) = common::memory_logger();
    logger.error_item(&json!({"ok": true}), "before");
    logger.error_item(&SelfReferentialMap::new(SelfReferential), "broken");
    logger.error("after");

    let lines = sink.lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], FALLBACK_LINE);
    assert_eq!(lines[1], r#"{"level":"FATAL","msg":"failed marshal to json"}"#);
}

/// Map wrapper so the failing value sits under a key, like real annotations.
struct SelfReferentialMap<T>(std::collections::BTreeMap<&'static str, T>);

impl<T> SelfReferentialMap<T> {
    fn new(value: T) -> Self {
        Self([("self", value)].into_iter().collect())
    }
}

impl<T: Serialize> Serialize for SelfReferentialMap<T> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

#[test]
fn test_every_line_round_trips() {
    let (logger, sink) = common::memory_logger();
    logger.trace("a \"quoted\" message");
    logger.debug_item(&json!({"list": [1, 2], "nested": {"k": null}}), "b");
    infof!(logger, items = &json!({"pct": 99.5}); "progress {}%", 99.5);
    logger.notice_item(&json!({}), "c");
    logger.logging("AUDIT", "custom label", None::<&serde_json::Value>);

    for line in common::parsed_lines(&sink) {
        assert!(line.is_object());
        for key in ["time", "level", "msg"] {
            assert!(line[key].is_string(), "missing {key}: {line}");
        }
        if let Some(items) = line.get("items") {
            assert!(items.as_object().is_some_and(|m| !m.is_empty()));
        }
    }
}

#[test]
fn test_instances_are_independent() {
    let first = MemorySink::new();
    let second = MemorySink::new();
    let a = Logger::new(first.clone()).with_threshold(Severity::Error);
    let b = Logger::new(second.clone());

    a.info("dropped");
    b.info("kept");

    assert!(first.is_empty());
    assert_eq!(second.len(), 1);
    assert_eq!(rnlog::default_logger().threshold(), Severity::Trace);
}

#[test]
fn test_config_built_logger() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.jsonl");
    let config = LoggerConfig {
        level: "warn".into(),
        sink: SinkConfig {
            kind: SinkKind::File,
            path: Some(path.display().to_string()),
            append: false,
        },
    };

    let logger = config.build().unwrap();
    logger.info("no");
    logger.warn_item(&json!({"disk": "sda"}), "almost full");
    logger.notice("always");

    let contents = std::fs::read_to_string(&path).unwrap();
    let levels: Vec<String> = contents
        .lines()
        .map(|l| {
            let record: serde_json::Value = serde_json::from_str(l).unwrap();
            record["level"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(levels, ["WARN", "NOTICE"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_tasks_share_one_logger() {
    let sink = MemorySink::new();
    let logger = Arc::new(Logger::new(sink.clone()));
    let tasks = 16;
    let per_task = 100;

    let mut handles = Vec::new();
    for task in 0..tasks {
        let logger = logger.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..per_task {
                logger.info_item(&json!({"task": task, "i": i}), "tick");
            }
        }));
    }
    let toggler = {
        let logger = logger.clone();
        tokio::spawn(async move {
            for _ in 0..100 {
                logger.set_threshold(Severity::Trace).unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    for handle in handles {
        handle.await.unwrap();
    }
    toggler.await.unwrap();

    let lines = common::parsed_lines(&sink);
    assert_eq!(lines.len(), tasks * per_task);
}
