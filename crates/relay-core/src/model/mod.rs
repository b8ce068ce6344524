//! Modelos neutrales (MessageEnvelope, PipelineMessage, TopicDescriptor,...)

pub mod descriptor;
pub mod envelope;
pub mod message;

pub use descriptor::{TopicDescriptor, TopicKind, TopicTemplate};
pub use envelope::MessageEnvelope;
pub use message::PipelineMessage;
