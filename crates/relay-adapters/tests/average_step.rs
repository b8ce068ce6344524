//! Tests del agregador por ventana (WindowedAverageStep).

use std::sync::Arc;

use relay_adapters::WindowedAverageStep;
use relay_core::{MessageEnvelope, OutcomeKind, PipelineMessage, ProcessingStep, StepCache, StepError, StepOutcome,
                 TopicDescriptor, TopicKind};

fn numeric(topic: &str, payload: &str) -> PipelineMessage {
    let descriptor = Arc::new(TopicDescriptor::new("temperature", TopicKind::ResourceTelemetry, topic));
    MessageEnvelope::new(topic, descriptor, Some(payload.as_bytes().to_vec()), false).into()
}

#[test]
fn ten_values_yield_nine_empty_then_the_mean() {
    let step = WindowedAverageStep::new();
    let cache = StepCache::new();

    let outcomes: Vec<StepOutcome> = (1..=10).map(|i| step.execute(&cache, numeric("t", &format!("{i}.0"))))
                                             .collect();

    let kinds: Vec<OutcomeKind> = outcomes.iter().map(|o| o.kind()).collect();
    assert_eq!(&kinds[..9], &[OutcomeKind::Empty; 9]);
    assert_eq!(kinds[9], OutcomeKind::Emitted);

    let emitted = outcomes[9].emitted().and_then(|m| m.as_mqtt()).expect("average emitted");
    assert_eq!(emitted.topic(), "t/average");
    assert_eq!(emitted.payload(), Some(&b"5.5"[..]));
    assert!(!emitted.is_retained());
    assert_eq!(step.buffered(&cache).unwrap(), 0, "buffer must be cleared on emission");
}

#[test]
fn non_numeric_payload_is_rejected_without_touching_the_window() {
    let step = WindowedAverageStep::new();
    let cache = StepCache::new();
    for v in ["1", "2", "3"] {
        assert!(step.execute(&cache, numeric("t", v)).is_empty());
    }

    let outcome = step.execute(&cache, numeric("t", "abc"));
    match outcome {
        StepOutcome::Error { message, error } => {
            assert_eq!(error, StepError::Format("payload is not numeric".into()));
            assert_eq!(message.topic(), "t");
        }
        other => panic!("expected error, got {other:?}"),
    }
    assert_eq!(step.buffered(&cache).unwrap(), 3);
}

#[test]
fn window_resets_after_each_emission() {
    let step = WindowedAverageStep::new();
    let cache = StepCache::new();

    let mut averages = Vec::new();
    for i in 1..=20 {
        if let Some(msg) = step.execute(&cache, numeric("t", &i.to_string())).emitted() {
            averages.push(String::from_utf8(msg.as_mqtt().unwrap().payload().unwrap().to_vec()).unwrap());
        }
    }
    // (1..=10)/10 = 5.5 ; (11..=20)/10 = 15.5
    assert_eq!(averages, vec!["5.5".to_string(), "15.5".to_string()]);
}

#[test]
fn descriptor_and_retained_flag_pass_through() {
    let step = WindowedAverageStep::with_window_size(2).unwrap();
    let cache = StepCache::new();
    let descriptor = Arc::new(TopicDescriptor::new("temperature", TopicKind::ResourceTelemetry, "telemetry/d/resource/t"));
    let env = MessageEnvelope::new("telemetry/d/resource/t", Arc::clone(&descriptor), Some(b"4".to_vec()), true);

    assert!(step.execute(&cache, env.clone().into()).is_empty());
    let out = step.execute(&cache, env.with_payload(b"6".to_vec()).into());
    let out = out.emitted().and_then(|m| m.as_mqtt()).expect("emitted");
    assert_eq!(out.topic(), "telemetry/d/resource/t/average");
    assert_eq!(out.payload(), Some(&b"5.0"[..]));
    assert!(out.is_retained());
    assert_eq!(out.descriptor().as_ref(), descriptor.as_ref());
}

#[test]
fn missing_payload_is_an_error() {
    let step = WindowedAverageStep::new();
    let cache = StepCache::new();
    let descriptor = Arc::new(TopicDescriptor::new("x", TopicKind::Telemetry, "t"));
    let outcome = step.execute(&cache, MessageEnvelope::new("t", descriptor, None, false).into());
    assert!(matches!(outcome, StepOutcome::Error { error: StepError::MissingData(_), .. }));
    assert_eq!(step.buffered(&cache).unwrap(), 0);
}

#[test]
fn zero_window_is_rejected() {
    assert!(matches!(WindowedAverageStep::with_window_size(0),
                     Err(StepError::InvalidConfiguration(_))));
    assert_eq!(WindowedAverageStep::default().window_size(), 10);
}

#[test]
fn instances_keep_separate_windows_in_a_shared_cache() {
    let a = WindowedAverageStep::new();
    let b = WindowedAverageStep::new();
    let cache = StepCache::new();
    for _ in 0..9 {
        let _ = a.execute(&cache, numeric("a", "1"));
    }
    let _ = b.execute(&cache, numeric("b", "1"));
    assert_eq!(a.buffered(&cache).unwrap(), 9);
    assert_eq!(b.buffered(&cache).unwrap(), 1);
}
