//! Data document loading.
//!
//! Reads the JSON document, validates it, and backfills missing entity
//! positions with uniform-random absolute coordinates inside the default
//! canvas, so the renderer never sees a position-less entity.

use anyhow::Context;
use rand::Rng;
use relmap_core::{DataError, GraphData, PosValue};
use std::path::Path;

/// Default canvas used when positions are missing from the document.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

pub fn load_graph(path: &Path) -> anyhow::Result<GraphData> {
    let text = std::fs::read_to_string(path)
        .map_err(DataError::Io)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut data: GraphData = serde_json::from_str(&text)
        .map_err(|e| DataError::Parse(e.to_string()))
        .with_context(|| format!("parsing {}", path.display()))?;
    data.validate()?;

    backfill_positions(&mut data, &mut rand::thread_rng());

    tracing::info!(
        entities = data.entities.len(),
        relations = data.relations.len(),
        "loaded data document"
    );
    Ok(data)
}

/// Assign independent uniform-random positions to entities missing either
/// coordinate, within the default canvas.
pub fn backfill_positions<R: Rng>(data: &mut GraphData, rng: &mut R) {
    for entity in &mut data.entities {
        if entity.x.is_none() || entity.y.is_none() {
            entity.x = Some(PosValue::px(rng.gen_range(0.0..DEFAULT_CANVAS_WIDTH)));
            entity.y = Some(PosValue::px(rng.gen_range(0.0..DEFAULT_CANVAS_HEIGHT)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_and_backfills_missing_positions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "entities": [
                    {{ "id": "a", "label": "A", "x": "10%", "y": "20px" }},
                    {{ "id": "b", "label": "B" }}
                ],
                "relations": []
            }}"#
        )
        .unwrap();

        let data = load_graph(file.path()).unwrap();
        let b = &data.entities[1];
        let x = b.x.as_ref().unwrap().resolve(0.0);
        let y = b.y.as_ref().unwrap().resolve(0.0);
        assert!((0.0..800.0).contains(&x));
        assert!((0.0..600.0).contains(&y));
        // Explicit positions are left alone.
        assert_eq!(data.entities[0].x, Some(PosValue::Text("10%".into())));
    }

    #[test]
    fn duplicate_ids_fail_loading() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "entities": [
                    {{ "id": "a", "label": "A" }},
                    {{ "id": "a", "label": "A again" }}
                ],
                "relations": []
            }}"#
        )
        .unwrap();
        assert!(load_graph(file.path()).is_err());
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load_graph(file.path()).unwrap_err();
        assert!(err.to_string().contains("parsing"));
    }
}
