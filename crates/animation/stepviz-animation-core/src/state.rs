//! Mutable session state that effects replay against.

use stepviz_api_core::Value;
use stepviz_structures_core::StructureRegistry;

/// Everything an effect can touch: the structure registry plus the
/// session-level message buffer. Owned by one engine; replay components
/// borrow it per call.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    pub registry: StructureRegistry,
    pub message: Value,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message_text(&self) -> Option<&str> {
        match &self.message {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}
