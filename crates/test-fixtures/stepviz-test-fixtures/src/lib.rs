//! Shared builders for stepviz integration tests.
//!
//! The canonical fixture is a "highlight run": an array where one cell per
//! gradeable step gets its background-color set, the pattern traversal
//! exercises grade on.

use anyhow::Result;
use stepviz_animation_core::{AnimationEngine, SessionConfig};
use stepviz_api_core::{AttrKey, StructureId, Value};

/// Css property graders conventionally compare as a proxy for "highlighted".
pub const HIGHLIGHT_PROPERTY: &str = "background-color";

/// Value written by `highlight`.
pub const HIGHLIGHT_COLOR: &str = "red";

/// Fresh engine holding a single int array.
pub fn engine_with_array(values: &[i64]) -> (AnimationEngine, StructureId) {
    let mut engine = AnimationEngine::new(SessionConfig::default());
    let id = engine
        .registry_mut()
        .add_array(values.iter().copied().map(Value::Int).collect());
    (engine, id)
}

/// Apply the highlight effect to one cell (push only; caller closes the step).
pub fn highlight(engine: &mut AnimationEngine, id: StructureId, index: usize) -> Result<()> {
    engine.apply_attr(
        id,
        AttrKey::Css {
            index,
            property: HIGHLIGHT_PROPERTY.to_string(),
        },
        HIGHLIGHT_COLOR,
    )?;
    Ok(())
}

/// Record one gradeable step per index in `order`, then finalize.
pub fn recorded_highlight_run(values: &[i64], order: &[usize]) -> Result<AnimationEngine> {
    let (mut engine, id) = engine_with_array(values);
    for &index in order {
        highlight(&mut engine, id, index)?;
        engine.gradeable_step()?;
    }
    engine.recorded()?;
    Ok(engine)
}

/// Canned host event payload for `log_event` tests.
pub fn sample_event_payload() -> serde_json::Value {
    serde_json::json!({ "type": "heap-decrement", "newSize": 7 })
}
