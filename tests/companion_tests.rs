use rfm_companion::engine::ToneDimension;
use rfm_companion::kernel::ScriptedSource;
use rfm_companion::persona::response::{FEAR_REPLY, JOY_REPLY};
use rfm_companion::persona::{PersonaMode, UTILITY_REPLY};
use rfm_companion::{
    Companion, CompanionConfig, ConversationEntry, EntryId, SubmitError, ToneVector,
};

fn fast_config() -> CompanionConfig {
    CompanionConfig {
        processing_latency_ms: 0,
        ..CompanionConfig::default()
    }
}

async fn run(companion: &Companion, text: &str) -> ConversationEntry {
    companion.submit(text).await.unwrap().await.unwrap()
}

fn scripted(config: CompanionConfig) -> Companion {
    Companion::with_random(config, Box::new(ScriptedSource::constant(0.5)))
}

#[tokio::test]
async fn test_submit_resolves_to_recorded_entry() {
    let companion = scripted(fast_config());

    let entry = run(&companion, "  I am so happy today  ").await;

    assert_eq!(entry.id, EntryId(1));
    assert_eq!(entry.input, "I am so happy today");
    assert_eq!(entry.tokens.len(), 5);
    assert_eq!(entry.tone.dominant_tone, ToneDimension::Joy);
    assert_eq!(entry.response, JOY_REPLY);

    assert_eq!(companion.history().await, vec![entry.clone()]);
    assert_eq!(companion.current_tone().await, entry.tone.vector);
    assert!(!companion.is_busy());
}

#[tokio::test]
async fn test_blank_input_is_a_no_op() {
    let companion = scripted(fast_config());

    for text in ["", "   ", "\t\n"] {
        let err = companion.submit(text).await.unwrap_err();
        assert_eq!(err, SubmitError::Empty);
    }

    assert!(companion.history().await.is_empty());
    assert_eq!(companion.current_tone().await, ToneVector::neutral());
    assert!(!companion.is_busy());
}

#[tokio::test]
async fn test_busy_submission_is_rejected() {
    let companion = scripted(CompanionConfig {
        processing_latency_ms: 50,
        ..CompanionConfig::default()
    });

    let first = companion.submit("I feel sad and scared").await.unwrap();
    assert!(companion.is_busy());
    assert!(companion.view().await.busy);

    let second = companion.submit("this should be ignored").await;
    assert_eq!(second.unwrap_err(), SubmitError::Busy);

    let entry = first.await.unwrap();
    assert_eq!(entry.tone.dominant_tone, ToneDimension::Fear);
    assert_eq!(entry.response, FEAR_REPLY);
    assert!(!companion.is_busy());

    let history = companion.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].input, "I feel sad and scared");
}

#[tokio::test]
async fn test_sequential_submissions_keep_order() {
    let companion = scripted(fast_config());

    let a = run(&companion, "first message").await;
    let b = run(&companion, "second message").await;

    assert!(a.id < b.id);
    assert!(a.timestamp <= b.timestamp);

    let history = companion.history().await;
    assert_eq!(history, vec![a, b]);
}

#[tokio::test]
async fn test_timeline_caps_at_window() {
    let companion = Companion::new(fast_config());
    for n in 1..=15 {
        run(&companion, &format!("message number {n}")).await;
    }

    let history = companion.history().await;
    let timeline = companion.timeline().await;
    assert_eq!(history.len(), 15);
    assert_eq!(timeline.len(), 10);
    for (point, entry) in timeline.iter().zip(&history[5..]) {
        assert_eq!(point.dominant_tone, entry.tone.dominant_tone);
        assert_eq!(
            point.intensity,
            (entry.tone.intensity * 100.0).round() as u32
        );
    }

    let recent = companion.recent(2).await;
    assert_eq!(recent[0].input, "message number 14");
    assert_eq!(recent[1].input, "message number 15");
    assert_eq!(companion.len().await, 15);
}

#[tokio::test]
async fn test_view_is_consistent_and_idempotent() {
    let companion = Companion::new(fast_config());
    run(&companion, "wow that is amazing").await;

    let first = companion.view().await;
    let second = companion.view().await;
    assert_eq!(first, second);
    assert_eq!(first.history.len(), 1);
    assert_eq!(first.current_tone, first.history[0].tone.vector);
    assert_eq!(first.radar.len(), 5);
    assert_eq!(first.timeline.len(), 1);
    assert!(!first.busy);

    assert_eq!(companion.radar().await, first.radar);
    assert_eq!(companion.timeline().await, first.timeline);
}

#[tokio::test]
async fn test_subscribers_receive_entries() {
    let companion = scripted(fast_config());
    let mut rx = companion.subscribe();

    let entry = run(&companion, "hello there").await;
    let received = rx.recv().await.unwrap();
    assert_eq!(received, entry);
}

#[tokio::test]
async fn test_seeded_companions_agree() {
    let config = CompanionConfig {
        seed: Some(1234),
        ..fast_config()
    };
    let a = Companion::new(config.clone());
    let b = Companion::new(config);

    for text in ["I am so happy today", "that was amazing", "I am worried"] {
        let ea = run(&a, text).await;
        let eb = run(&b, text).await;
        assert_eq!(ea.tone, eb.tone);
        assert_eq!(ea.tokens, eb.tokens);
        assert_eq!(ea.response, eb.response);
    }
}

#[tokio::test]
async fn test_utility_persona_ignores_tone() {
    let companion = scripted(CompanionConfig {
        persona: PersonaMode::Utility,
        ..fast_config()
    });

    let entry = run(&companion, "I am so angry right now").await;
    assert_eq!(entry.tone.dominant_tone, ToneDimension::Anger);
    assert_eq!(entry.response, UTILITY_REPLY);
    assert!(entry.shifts.is_empty());
}

#[tokio::test]
async fn test_field_shifts_are_recorded() {
    let companion = Companion::with_random(
        CompanionConfig {
            persona: PersonaMode::Therapist,
            ..fast_config()
        },
        Box::new(ScriptedSource::constant(0.9)),
    );

    // joy 0.72, fear 0.54, anger 0.95, sadness 0.54, surprise 0.63
    let entry = run(&companion, "I am mad").await;
    let dims: Vec<_> = entry.shifts.iter().map(|s| s.dimension).collect();
    assert_eq!(dims, vec![ToneDimension::Anger]);

    let snap = companion.telemetry().await;
    assert_eq!(snap.shift_stats.total(), 1);
}

#[tokio::test]
async fn test_telemetry_counts() {
    let companion = scripted(CompanionConfig {
        processing_latency_ms: 20,
        ..CompanionConfig::default()
    });

    let _ = companion.submit("   ").await;
    let pending = companion.submit("I feel sad and scared").await.unwrap();
    let _ = companion.submit("too soon").await;
    pending.await.unwrap();

    let snap = companion.telemetry().await;
    assert_eq!(snap.accepted, 1);
    assert_eq!(snap.rejected_empty, 1);
    assert_eq!(snap.rejected_busy, 1);
    assert_eq!(snap.completed, 1);
    assert_eq!(snap.dominant_counts.get(&ToneDimension::Fear), Some(&1));
    assert!(snap.avg_latency_ms >= 20.0);
}

#[tokio::test]
async fn test_session_log_appends_ndjson() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("stream.ndjson");
    let companion = scripted(CompanionConfig {
        session_log: Some(path.clone()),
        ..fast_config()
    });

    run(&companion, "first line").await;
    run(&companion, "second line").await;

    let raw = std::fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = raw
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);

    let session = companion.session_id().to_string();
    assert_eq!(records[0]["session_id"], session.as_str());
    assert_eq!(records[0]["entry"]["input"], "first line");
    assert_eq!(records[1]["entry"]["input"], "second line");
    assert_eq!(records[1]["entry"]["id"], 2);
    assert!(records[1]["logged_at"].is_string());
}

#[tokio::test]
async fn test_failing_session_log_does_not_stop_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened for append
    let companion = scripted(CompanionConfig {
        session_log: Some(dir.path().to_path_buf()),
        ..fast_config()
    });

    let entry = run(&companion, "I am so happy today").await;
    assert_eq!(entry.response, JOY_REPLY);
    assert_eq!(companion.history().await.len(), 1);
    assert!(!companion.is_busy());

    run(&companion, "still going").await;
    assert_eq!(companion.len().await, 2);
}

#[tokio::test]
async fn test_export_session_writes_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let companion = scripted(CompanionConfig {
        session_log: Some(dir.path().join("stream.ndjson")),
        ..fast_config()
    });
    run(&companion, "first line").await;
    run(&companion, "second line").await;

    let path = companion.export_session("session").await.unwrap().unwrap();
    assert_eq!(path.parent(), Some(dir.path()));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(
        name.starts_with("session_") && name.ends_with("Z.json"),
        "{name}"
    );
    // session_YYYYMMDDTHHMMSSZ.json
    assert_eq!(name.len(), "session_".len() + 16 + ".json".len());

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\n  "));
    let export: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        export["session_id"],
        companion.session_id().to_string().as_str()
    );
    assert_eq!(export["entries"].as_array().unwrap().len(), 2);
    assert_eq!(export["entries"][1]["input"], "second line");
}

#[tokio::test]
async fn test_export_without_session_log() {
    let companion = scripted(fast_config());
    run(&companion, "hello").await;
    let exported = companion.export_session("session").await.unwrap();
    assert!(exported.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_subscriber_can_resubmit_on_broadcast() {
    let companion = scripted(fast_config());
    let mut rx = companion.subscribe();

    for round in 1..=20u64 {
        let pending = companion.submit("ping").await.unwrap();
        let entry = rx.recv().await.unwrap();
        assert_eq!(entry.id, EntryId(round));
        assert!(!companion.is_busy());
        assert!(!companion.view().await.busy);
        pending.await.unwrap();
    }
    assert_eq!(companion.len().await, 20);
}

#[tokio::test]
async fn test_view_never_shows_recorded_entry_as_busy() {
    let companion = scripted(CompanionConfig {
        processing_latency_ms: 20,
        ..CompanionConfig::default()
    });

    let pending = companion.submit("watch me").await.unwrap();
    loop {
        let view = companion.view().await;
        if !view.history.is_empty() {
            assert!(!view.busy);
            break;
        }
        assert!(view.busy);
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
    }
    pending.await.unwrap();
}

#[tokio::test]
async fn test_replay_returns_token_nodes() {
    let companion = scripted(fast_config());
    for text in ["one two", "three", "four five six"] {
        run(&companion, text).await;
    }

    let replayed = companion.replay(2).await;
    let texts: Vec<Vec<_>> = replayed
        .iter()
        .map(|tokens| tokens.iter().map(|t| t.text.clone()).collect())
        .collect();
    assert_eq!(texts, vec![vec!["three"], vec!["four", "five", "six"]]);
    assert_eq!(replayed[1][1].parent, Some(replayed[1][0].id));
    assert_eq!(companion.replay(10).await.len(), 3);
}
