//! Tests de TopicRemapStep.

use std::sync::Arc;

use proptest::prelude::*;
use relay_adapters::TopicRemapStep;
use relay_core::{MessageEnvelope, OutcomeKind, PipelineMessage, ProcessingStep, StepCache, StepError, StepOutcome,
                 TopicDescriptor, TopicKind};

fn envelope(topic: &str, payload: Option<Vec<u8>>, retained: bool) -> MessageEnvelope {
    let descriptor = Arc::new(TopicDescriptor::new("telemetry", TopicKind::Telemetry, topic));
    MessageEnvelope::new(topic, descriptor, payload, retained)
}

fn remapped(outcome: &StepOutcome) -> &MessageEnvelope {
    outcome.emitted().and_then(PipelineMessage::as_mqtt).expect("remap always emits")
}

#[test]
fn remaps_telemetry_topic_and_keeps_payload() {
    let step = TopicRemapStep::new();
    let cache = StepCache::new();
    let input = envelope("telemetry/x", Some(vec![0x41, 0x42]), true);

    let outcome = step.execute(&cache, input.clone().into());
    let out = remapped(&outcome);
    assert_eq!(out.topic(), "pipeline/telemetry/x");
    assert_eq!(out.payload(), Some(&[0x41, 0x42][..]));
    assert!(out.is_retained());
    assert!(Arc::ptr_eq(out.descriptor(), input.descriptor()));
    assert!(cache.is_empty(), "remap is stateless");
}

#[test]
fn empty_payload_still_emits() {
    let step = TopicRemapStep::new();
    let outcome = step.execute(&StepCache::new(), envelope("t", Some(vec![]), false).into());
    assert_eq!(outcome.kind(), OutcomeKind::Emitted);
    assert_eq!(remapped(&outcome).payload(), Some(&[][..]));
}

#[test]
fn absent_payload_is_an_error() {
    let step = TopicRemapStep::new();
    let outcome = step.execute(&StepCache::new(), envelope("t", None, false).into());
    assert!(matches!(outcome, StepOutcome::Error { error: StepError::MissingData(_), .. }));
}

#[test]
fn custom_prefix() {
    let step = TopicRemapStep::with_prefix("wldt/").unwrap();
    assert_eq!(step.prefix(), "wldt");
    let outcome = step.execute(&StepCache::new(), envelope("events/d", Some(b"on".to_vec()), false).into());
    assert_eq!(remapped(&outcome).topic(), "wldt/events/d");
    assert!(TopicRemapStep::with_prefix("").is_err());
}

proptest! {
    #[test]
    fn payload_is_bit_identical_for_any_bytes(payload in proptest::collection::vec(any::<u8>(), 0..256),
                                              retained in any::<bool>()) {
        let step = TopicRemapStep::new();
        let outcome = step.execute(&StepCache::new(), envelope("t", Some(payload.clone()), retained).into());
        let out = remapped(&outcome);
        prop_assert_eq!(out.topic(), "pipeline/t");
        prop_assert_eq!(out.payload(), Some(payload.as_slice()));
        prop_assert_eq!(out.is_retained(), retained);
    }
}
