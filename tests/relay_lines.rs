//! Tests de integración del relay (líneas `"<topic> <payload>"`).

use twin_relay::{CoreError, PublishedMessage, Relay, RelayConfig};

fn relay_for(pairs: &[(&str, &str)]) -> Relay {
    let owned: Vec<(String, String)> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    let cfg = RelayConfig::from_lookup(|key| owned.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())).expect("config");
    Relay::from_config(&cfg).expect("relay")
}

#[test]
fn resource_telemetry_is_averaged_and_remapped() {
    let relay = relay_for(&[("RELAY_DEVICE_ID", "dev-1")]);
    let topic = "telemetry/dev-1/resource/temperature";

    let mut published: Vec<PublishedMessage> = Vec::new();
    for i in 1..=10 {
        if let Some(p) = relay.handle_line(&format!("{topic} {i}.0")).expect("handled") {
            published.push(p);
        }
    }
    assert_eq!(published,
               vec![PublishedMessage { topic: "pipeline/telemetry/dev-1/resource/temperature/average".into(),
                                       payload: "5.5".into(),
                                       retained: false }]);
}

#[test]
fn events_are_remapped_immediately() {
    let relay = relay_for(&[("RELAY_DEVICE_ID", "dev-1"), ("RELAY_REMAP_PREFIX", "wldt")]);
    let out = relay.handle_line("events/dev-1 door_open").expect("handled").expect("published");
    assert_eq!(out.topic, "wldt/events/dev-1");
    assert_eq!(out.payload, "door_open");
}

#[test]
fn command_requests_are_wrapped_in_a_command_envelope() {
    let relay = relay_for(&[("RELAY_DEVICE_ID", "dev-1")]);
    let out = relay.handle_line("commands/dev-1/request REBOOT_DEVICE").expect("handled").expect("published");
    assert_eq!(out.topic, "pipeline/commands/dev-1/request");
    let body: serde_json::Value = serde_json::from_str(&out.payload).expect("json payload");
    assert_eq!(body["type"], "demo_command_data_structure");
    assert_eq!(body["originalMessage"], "REBOOT_DEVICE");
    assert!(body["timestamp"].as_i64().is_some());
}

#[test]
fn unknown_topics_and_bad_payloads_produce_no_output() {
    let relay = relay_for(&[("RELAY_DEVICE_ID", "dev-1")]);
    assert!(relay.handle_line("telemetry/other-device 1.0").expect("handled").is_none());
    assert!(relay.handle_line("telemetry/dev-1 abc").expect("handled").is_none());
    assert!(relay.handle_line("   ").expect("handled").is_none());
}

#[test]
fn small_window_from_configuration() {
    let relay = relay_for(&[("RELAY_DEVICE_ID", "dev-1"), ("RELAY_WINDOW_SIZE", "2")]);
    assert!(relay.handle_line("telemetry/dev-1 1").expect("handled").is_none());
    let out = relay.handle_line("telemetry/dev-1 2").expect("handled").expect("published");
    assert_eq!(out.topic, "pipeline/telemetry/dev-1/average");
    assert_eq!(out.payload, "1.5");
}

#[test]
fn invalid_window_configuration_is_reported() {
    let err = RelayConfig::from_lookup(|key| (key == "RELAY_WINDOW_SIZE").then(|| "-1".to_string())).unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
}

#[test]
fn each_resource_topic_keeps_its_own_window() {
    let relay = relay_for(&[("RELAY_DEVICE_ID", "dev-1"), ("RELAY_RESOURCE_IDS", "temp,humidity"), ("RELAY_WINDOW_SIZE", "5")]);

    let mut published: Vec<PublishedMessage> = Vec::new();
    for _ in 0..5 {
        for line in ["telemetry/dev-1/resource/temp 20.0", "telemetry/dev-1/resource/humidity 80.0"] {
            if let Some(p) = relay.handle_line(line).expect("handled") {
                published.push(p);
            }
        }
    }
    assert_eq!(published,
               vec![PublishedMessage { topic: "pipeline/telemetry/dev-1/resource/temp/average".into(),
                                       payload: "20.0".into(),
                                       retained: false },
                    PublishedMessage { topic: "pipeline/telemetry/dev-1/resource/humidity/average".into(),
                                       payload: "80.0".into(),
                                       retained: false }]);
}

#[test]
fn device_telemetry_does_not_feed_resource_windows() {
    let relay = relay_for(&[("RELAY_DEVICE_ID", "dev-1"), ("RELAY_WINDOW_SIZE", "2")]);
    assert!(relay.handle_line("telemetry/dev-1 1").expect("handled").is_none());
    assert!(relay.handle_line("telemetry/dev-1/resource/temperature 100").expect("handled").is_none());
    let out = relay.handle_line("telemetry/dev-1 3").expect("handled").expect("published");
    assert_eq!(out.topic, "pipeline/telemetry/dev-1/average");
    assert_eq!(out.payload, "2.0");
}

#[test]
fn long_running_relay_keeps_journals_bounded() {
    let relay = relay_for(&[("RELAY_DEVICE_ID", "dev-1"), ("RELAY_JOURNAL_CAPACITY", "32")]);
    for i in 0..5_000 {
        relay.handle_line(&format!("telemetry/dev-1 {i}")).expect("handled");
        relay.handle_line("events/dev-1 tick").expect("handled");
    }
    let telemetry = relay.executor_for("telemetry/dev-1").expect("telemetry route");
    let events = relay.executor_for("events/dev-1").expect("event route");
    assert_eq!(telemetry.events().len(), 32);
    assert_eq!(events.events().len(), 32);
}
