//! Descriptores de topic.
//!
//! Un `TopicDescriptor` describe el canal lógico del que proviene un mensaje.
//! Para los steps es opaco: lo reciben dentro del envelope y lo propagan sin
//! tocarlo. Los descriptores se construyen a partir de plantillas con los
//! placeholders `{{device_id}}` y `{{resource_id}}`.
use serde::{Deserialize, Serialize};

/// Familias de canales que maneja el relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopicKind {
    Telemetry,
    ResourceTelemetry,
    Event,
    CommandRequest,
    CommandResponse,
}

/// Metadatos del canal de origen de un mensaje.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDescriptor {
    pub id: String,
    pub kind: TopicKind,
    /// Topic ya renderizado (sin placeholders).
    pub topic: String,
}

impl TopicDescriptor {
    pub fn new(id: impl Into<String>, kind: TopicKind, topic: impl Into<String>) -> Self {
        Self { id: id.into(),
               kind,
               topic: topic.into() }
    }

    /// `true` si `topic` corresponde exactamente a este canal.
    pub fn matches(&self, topic: &str) -> bool {
        self.topic == topic
    }
}

/// Plantilla de topic con placeholders `{{device_id}}` / `{{resource_id}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicTemplate(pub String);

impl TopicTemplate {
    const DEVICE_PLACEHOLDER: &'static str = "{{device_id}}";
    const RESOURCE_PLACEHOLDER: &'static str = "{{resource_id}}";

    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Indica si la plantilla necesita un `resource_id` para renderizarse.
    pub fn needs_resource(&self) -> bool {
        self.0.contains(Self::RESOURCE_PLACEHOLDER)
    }

    /// Sustituye los placeholders. Si la plantilla pide `resource_id` y no se
    /// proporciona, el placeholder queda sin sustituir.
    pub fn render(&self, device_id: &str, resource_id: Option<&str>) -> String {
        let rendered = self.0.replace(Self::DEVICE_PLACEHOLDER, device_id);
        match resource_id {
            Some(r) => rendered.replace(Self::RESOURCE_PLACEHOLDER, r),
            None => rendered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_device_and_resource_placeholders() {
        let t = TopicTemplate::new("telemetry/{{device_id}}/resource/{{resource_id}}");
        assert!(t.needs_resource());
        assert_eq!(t.render("dev-1", Some("temperature")), "telemetry/dev-1/resource/temperature");
    }

    #[test]
    fn descriptor_matches_rendered_topic_only() {
        let d = TopicDescriptor::new("events", TopicKind::Event, "events/dev-1");
        assert!(d.matches("events/dev-1"));
        assert!(!d.matches("events/dev-2"));
    }
}
