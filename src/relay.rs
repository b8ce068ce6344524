//! Relay de mensajes: resuelve el canal de cada mensaje entrante y lo
//! despacha por el pipeline que le corresponde.
//!
//! - Telemetría (dispositivo o recurso): `WindowedAverageStep -> TopicRemapStep`,
//!   con un pipeline (y una ventana) por canal.
//! - Peticiones de comando: el payload se envuelve en un `CommandEnvelope`
//!   JSON y pasa por `TopicRemapStep`.
//! - Eventos y respuestas de comando: sólo `TopicRemapStep`.
//!
//! La suscripción al bus queda fuera: el binario alimenta el relay con líneas
//! `"<topic> <payload>"`.
use std::sync::Arc;

use log::{debug, warn};
use relay_adapters::{CommandEnvelope, TopicRemapStep, WindowedAverageStep};
use relay_core::{DispatchResult, MessageEnvelope, PipelineExecutor, PipelineMessage, TopicDescriptor, TopicKind};
use serde::Serialize;

use crate::config::RelayConfig;
use crate::errors::CoreError;

/// Mensaje listo para republicar, en la forma que imprime el binario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: String,
    pub retained: bool,
}

impl PublishedMessage {
    fn from_pipeline(message: &PipelineMessage) -> Option<Self> {
        let env = message.as_mqtt()?;
        Some(Self { topic: env.topic().to_string(),
                    payload: String::from_utf8_lossy(env.payload()?).into_owned(),
                    retained: env.is_retained() })
    }
}

/// Canal configurado. Los de telemetría llevan su propio pipeline (y por
/// tanto su propia ventana de promedio); el resto usa el de remapeo
/// compartido.
#[derive(Debug)]
struct Route {
    descriptor: Arc<TopicDescriptor>,
    telemetry: Option<PipelineExecutor>,
}

#[derive(Debug)]
pub struct Relay {
    routes: Vec<Route>,
    passthrough: PipelineExecutor,
}

impl Relay {
    pub fn from_config(config: &RelayConfig) -> Result<Self, CoreError> {
        let remap = || TopicRemapStep::with_prefix(config.remap_prefix.as_str());

        let mut routes = Vec::new();
        for descriptor in config.descriptors() {
            let telemetry = match descriptor.kind {
                TopicKind::Telemetry | TopicKind::ResourceTelemetry => {
                    let executor = PipelineExecutor::bounded_builder(config.journal_capacity)
                        .add_step(WindowedAverageStep::with_window_size(config.window_size)?)
                        .add_step(remap()?)
                        .build()?;
                    Some(executor)
                }
                TopicKind::Event | TopicKind::CommandRequest | TopicKind::CommandResponse => None,
            };
            routes.push(Route { descriptor: Arc::new(descriptor),
                                telemetry });
        }
        let passthrough = PipelineExecutor::bounded_builder(config.journal_capacity).add_step(remap()?)
                                                                                    .build()?;
        Ok(Self { routes, passthrough })
    }

    fn route(&self, topic: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.descriptor.matches(topic))
    }

    /// Descriptor del canal configurado que coincide con `topic`.
    pub fn resolve(&self, topic: &str) -> Option<Arc<TopicDescriptor>> {
        self.route(topic).map(|r| Arc::clone(&r.descriptor))
    }

    /// Pipeline que procesa los mensajes de `topic`.
    pub fn executor_for(&self, topic: &str) -> Option<&PipelineExecutor> {
        self.route(topic).map(|r| r.telemetry.as_ref().unwrap_or(&self.passthrough))
    }

    /// Procesa un mensaje entrante. Devuelve el mensaje a republicar, o
    /// `None` si el pipeline no produjo salida (acumulando, error o topic
    /// desconocido).
    pub fn handle(&self, topic: &str, payload: &[u8], retained: bool) -> Result<Option<PublishedMessage>, CoreError> {
        let Some(route) = self.route(topic) else {
            warn!("no descriptor configured for topic {topic}, skipping");
            return Ok(None);
        };

        let (executor, payload) = match (&route.telemetry, route.descriptor.kind) {
            (Some(executor), _) => (executor, payload.to_vec()),
            (None, TopicKind::CommandRequest) => {
                (&self.passthrough, CommandEnvelope::from_payload(payload).to_json_bytes()?)
            }
            (None, _) => (&self.passthrough, payload.to_vec()),
        };

        let descriptor = Arc::clone(&route.descriptor);
        let message: PipelineMessage = MessageEnvelope::new(topic, descriptor, Some(payload), retained).into();
        match executor.dispatch(message) {
            DispatchResult::Published(out) => Ok(PublishedMessage::from_pipeline(&out)),
            DispatchResult::Suppressed { step } => {
                debug!("{topic}: no output from {step}");
                Ok(None)
            }
            DispatchResult::Failed { step, reason, .. } => {
                warn!("{topic}: dropped by {step}: {reason}");
                Ok(None)
            }
        }
    }

    /// Procesa una línea `"<topic> <payload>"`. Las líneas vacías se ignoran;
    /// una línea sin espacio se interpreta como topic con payload vacío.
    pub fn handle_line(&self, line: &str) -> Result<Option<PublishedMessage>, CoreError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }
        let (topic, payload) = line.split_once(' ').unwrap_or((line, ""));
        self.handle(topic, payload.as_bytes(), false)
    }
}
