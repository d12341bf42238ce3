//! Scenario files: one ego pose plus a list of world-frame queries.
//!
//! ```toml
//! [pose.location]
//! x = 10.0
//! y = 5.0
//! z = 0.0
//!
//! [pose.rotation]
//! pitch = 0.0
//! yaw = 90.0
//! roll = 0.0
//!
//! [[queries]]
//! name = "stop_line"
//! kind = "point"
//! x = 12.0
//! y = 5.0
//! z = 0.0
//! ```

use std::fs;
use std::path::Path;

use egoframe_transform::FrameConverter;
use egoframe_types::{EgoPose, FrameError, Vector3D};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether a query is a located point or a free direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Rotated and translated.
    #[default]
    Point,
    /// Rotated only.
    Vector,
}

/// A single world-frame input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Query {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: QueryKind,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Query {
    pub fn vector(&self) -> Vector3D {
        Vector3D::new(self.x, self.y, self.z)
    }
}

/// Contents of a scenario TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scenario {
    /// Ego pose in the host world frame.
    pub pose: EgoPose,
    #[serde(default)]
    pub queries: Vec<Query>,
}

/// One converted query, ready for printing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Converted {
    pub name: String,
    pub kind: QueryKind,
    pub world: Vector3D,
    pub ego: [f64; 3],
}

pub fn parse(raw: &str) -> Result<Scenario, FrameError> {
    toml::from_str(raw).map_err(|e| FrameError::Scenario(format!("Failed to parse scenario: {e}")))
}

pub fn load(path: &Path) -> Result<Scenario, FrameError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        FrameError::Scenario(format!("Failed to read scenario at {}: {}", path.display(), e))
    })?;
    parse(&raw)
}

/// Run every query through `converter`.  Unnamed queries are labelled by
/// their 1-based position.
pub fn convert_all(converter: &FrameConverter, queries: &[Query]) -> Vec<Converted> {
    queries
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let world = q.vector();
            let ego = match q.kind {
                QueryKind::Point => converter.transform_world_to_ego(world),
                QueryKind::Vector => converter.rotate_world_to_ego(world),
            };
            Converted {
                name: q.name.clone().unwrap_or_else(|| format!("#{}", i + 1)),
                kind: q.kind,
                world,
                ego,
            }
        })
        .collect()
}

/// JSON Schema describing the scenario file layout.
pub fn schema_json() -> Result<String, String> {
    let schema = schemars::schema_for!(Scenario);
    serde_json::to_string_pretty(&schema).map_err(|e| format!("Failed to render schema: {e}"))
}
