//! Payload deserialization structs for the `data:` line of each event.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::models::UiComponent;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TextChunkPayload {
    pub chunk: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MessageCompletePayload {
    #[serde(rename = "messageId", deserialize_with = "integral_id")]
    pub message_id: i64,
}

/// Accept `42` and `42.0` alike; reject fractions.
fn integral_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(id) = number.as_i64() {
        return Ok(id);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(D::Error::custom(format!("messageId {} is not an integer", number))),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorPayload {
    pub error: String,
}

/// The shapes a `ui_component` payload arrives in.
///
/// Variant order matters: `Single` accepts any object, so the `{components}`
/// wrapper has to be tried before it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum UiComponentPayload {
    List(Vec<UiComponent>),
    Wrapped { components: Vec<UiComponent> },
    Single(UiComponent),
}

impl UiComponentPayload {
    pub fn into_components(self) -> Vec<UiComponent> {
        match self {
            UiComponentPayload::List(components)
            | UiComponentPayload::Wrapped { components } => components,
            UiComponentPayload::Single(component) => vec![component],
        }
    }
}
