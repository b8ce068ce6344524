//! Configuración central del relay.
//! Carga variables de entorno (.env opcional) y expone `RelayConfig`, a
//! partir del cual se renderizan los descriptores de topic y se construyen
//! los steps del pipeline.
use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use relay_core::constants::{DEFAULT_JOURNAL_CAPACITY, DEFAULT_REMAP_PREFIX, DEFAULT_WINDOW_SIZE};
use relay_core::{TopicDescriptor, TopicKind, TopicTemplate};

use crate::errors::CoreError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Forzar carga temprana de .env desde el binario.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

pub const DEFAULT_DEVICE_ID: &str = "com:iot:dummy:dummyMqttDevice001";
pub const DEFAULT_RESOURCE_IDS: &str = "temperature";
pub const DEFAULT_TELEMETRY_TOPIC: &str = "telemetry/{{device_id}}";
pub const DEFAULT_RESOURCE_TELEMETRY_TOPIC: &str = "telemetry/{{device_id}}/resource/{{resource_id}}";
pub const DEFAULT_EVENT_TOPIC: &str = "events/{{device_id}}";
pub const DEFAULT_COMMAND_REQUEST_TOPIC: &str = "commands/{{device_id}}/request";
pub const DEFAULT_COMMAND_RESPONSE_TOPIC: &str = "commands/{{device_id}}/response";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Dispositivo cuyo gemelo digital alimenta el relay.
    pub device_id: String,
    /// Recursos del dispositivo con topic de telemetría propio.
    pub resource_ids: Vec<String>,
    pub window_size: usize,
    pub remap_prefix: String,
    /// Eventos retenidos por el journal de cada pipeline.
    pub journal_capacity: usize,
    pub telemetry_topic: TopicTemplate,
    pub resource_telemetry_topic: TopicTemplate,
    pub event_topic: TopicTemplate,
    pub command_request_topic: TopicTemplate,
    pub command_response_topic: TopicTemplate,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self { device_id: DEFAULT_DEVICE_ID.to_string(),
               resource_ids: split_ids(DEFAULT_RESOURCE_IDS),
               window_size: DEFAULT_WINDOW_SIZE,
               remap_prefix: DEFAULT_REMAP_PREFIX.to_string(),
               journal_capacity: DEFAULT_JOURNAL_CAPACITY,
               telemetry_topic: TopicTemplate::new(DEFAULT_TELEMETRY_TOPIC),
               resource_telemetry_topic: TopicTemplate::new(DEFAULT_RESOURCE_TELEMETRY_TOPIC),
               event_topic: TopicTemplate::new(DEFAULT_EVENT_TOPIC),
               command_request_topic: TopicTemplate::new(DEFAULT_COMMAND_REQUEST_TOPIC),
               command_response_topic: TopicTemplate::new(DEFAULT_COMMAND_RESPONSE_TOPIC) }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        init_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de lookup (permite
    /// tests sin tocar el entorno del proceso).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();
        let template = |key: &str, default: TopicTemplate| lookup(key).map(TopicTemplate::new).unwrap_or(default);

        let window_size = match lookup("RELAY_WINDOW_SIZE") {
            None => defaults.window_size,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(CoreError::Config(format!("RELAY_WINDOW_SIZE must be a positive integer, got `{raw}`"))),
            },
        };
        let journal_capacity = match lookup("RELAY_JOURNAL_CAPACITY") {
            None => defaults.journal_capacity,
            Some(raw) => raw.trim()
                            .parse::<usize>()
                            .map_err(|_| CoreError::Config(format!("RELAY_JOURNAL_CAPACITY must be a non-negative integer, got `{raw}`")))?,
        };
        let remap_prefix = lookup("RELAY_REMAP_PREFIX").unwrap_or(defaults.remap_prefix);
        if remap_prefix.trim().is_empty() {
            return Err(CoreError::Config("RELAY_REMAP_PREFIX must not be empty".into()));
        }

        Ok(Self { device_id: lookup("RELAY_DEVICE_ID").unwrap_or(defaults.device_id),
                  resource_ids: lookup("RELAY_RESOURCE_IDS").map(|v| split_ids(&v)).unwrap_or(defaults.resource_ids),
                  window_size,
                  remap_prefix,
                  journal_capacity,
                  telemetry_topic: template("RELAY_TELEMETRY_TOPIC", defaults.telemetry_topic),
                  resource_telemetry_topic: template("RELAY_RESOURCE_TELEMETRY_TOPIC", defaults.resource_telemetry_topic),
                  event_topic: template("RELAY_EVENT_TOPIC", defaults.event_topic),
                  command_request_topic: template("RELAY_COMMAND_REQUEST_TOPIC", defaults.command_request_topic),
                  command_response_topic: template("RELAY_COMMAND_RESPONSE_TOPIC", defaults.command_response_topic) })
    }

    /// Renderiza las plantillas en descriptores concretos: uno por familia y
    /// uno de telemetría por cada recurso.
    pub fn descriptors(&self) -> Vec<TopicDescriptor> {
        let device = self.device_id.as_str();
        let mut out = vec![TopicDescriptor::new("telemetry", TopicKind::Telemetry, self.telemetry_topic.render(device, None))];
        out.extend(self.resource_ids.iter().map(|rid| {
                                               TopicDescriptor::new(format!("resource:{rid}"),
                                                                    TopicKind::ResourceTelemetry,
                                                                    self.resource_telemetry_topic.render(device, Some(rid)))
                                           }));
        out.push(TopicDescriptor::new("events", TopicKind::Event, self.event_topic.render(device, None)));
        out.push(TopicDescriptor::new("command_request",
                                      TopicKind::CommandRequest,
                                      self.command_request_topic.render(device, None)));
        out.push(TopicDescriptor::new("command_response",
                                      TopicKind::CommandResponse,
                                      self.command_response_topic.render(device, None)));
        out
    }
}

fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}
