use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Width or height of a widget instance in grid units. The dashboard grid
/// only knows two spans; anything else in persisted data is rejected during
/// deserialization and the whole snapshot falls back to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GridSpan {
    One,
    Two,
}

impl Default for GridSpan {
    fn default() -> Self {
        GridSpan::One
    }
}

impl GridSpan {
    pub fn cells(self) -> u16 {
        match self {
            GridSpan::One => 1,
            GridSpan::Two => 2,
        }
    }
}

impl TryFrom<u8> for GridSpan {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GridSpan::One),
            2 => Ok(GridSpan::Two),
            other => Err(format!("invalid grid span {other}, expected 1 or 2")),
        }
    }
}

impl From<GridSpan> for u8 {
    fn from(span: GridSpan) -> u8 {
        span.cells() as u8
    }
}

/// One configured occurrence of a registered widget type inside a section.
/// `config` is an opaque JSON object owned by the widget that renders it;
/// the store only ever merges into it, never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default = "empty_config")]
    pub config: Value,
    #[serde(default)]
    pub w: GridSpan,
    #[serde(default)]
    pub h: GridSpan,
}

/// Sub-page of a section. Structurally a component list of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub components: Vec<ComponentInstance>,
}

/// Top-level life-domain grouping. Owns its components and pages
/// exclusively; removing a section removes both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    pub icon_name: String,
    #[serde(default)]
    pub components: Vec<ComponentInstance>,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Section {
    pub fn new(id: String, title: String, icon_name: String) -> Self {
        Self {
            id,
            title,
            icon_name,
            components: Vec::new(),
            pages: Vec::new(),
        }
    }

    pub fn component(&self, component_id: &str) -> Option<&ComponentInstance> {
        self.components.iter().find(|c| c.id == component_id)
    }
}

/// The full serializable state of the dashboard at a point in time. This is
/// exactly the document written to durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub active_section_id: Option<String>,
    #[serde(default)]
    pub active_page_id: Option<String>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            sections: vec![Section::new(
                "home".to_string(),
                "Dashboard".to_string(),
                "LayoutDashboard".to_string(),
            )],
            active_section_id: Some("home".to_string()),
            active_page_id: None,
        }
    }
}

impl Snapshot {
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }
}

fn empty_config() -> Value {
    Value::Object(Default::default())
}

const ID_LEN: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Fresh random identifier: nine base-36 characters.
pub fn fresh_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Shallow-merge `updates` into `base`: keys present in `updates` overwrite,
/// keys only in `base` survive. Anything that is not an object on both sides
/// is replaced wholesale. Widgets only ever send the fields they changed, so
/// merge (not replace) semantics are load-bearing.
pub fn merge_config(base: &Value, updates: &Value) -> Value {
    match (base, updates) {
        (Value::Object(a), Value::Object(b)) => {
            let mut merged = a.clone();
            for (k, v) in b {
                merged.insert(k.clone(), v.clone());
            }
            Value::Object(merged)
        }
        _ => updates.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn grid_span_accepts_only_one_and_two() {
        assert_eq!(GridSpan::try_from(1u8), Ok(GridSpan::One));
        assert_eq!(GridSpan::try_from(2u8), Ok(GridSpan::Two));
        assert!(GridSpan::try_from(0u8).is_err());
        assert!(GridSpan::try_from(3u8).is_err());
    }

    #[test]
    fn grid_span_serializes_as_integer() {
        let json = serde_json::to_string(&GridSpan::Two).unwrap();
        assert_eq!(json, "2");
        let span: GridSpan = serde_json::from_str("1").unwrap();
        assert_eq!(span, GridSpan::One);
        assert!(serde_json::from_str::<GridSpan>("3").is_err());
    }

    #[test]
    fn fresh_ids_are_nine_base36_chars() {
        for _ in 0..50 {
            let id = fresh_id();
            assert_eq!(id.len(), 9);
            assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn merge_config_overwrites_and_preserves() {
        let base = json!({"a": 1, "keep": {"nested": true}});
        let updates = json!({"a": 2, "b": 3});
        let merged = merge_config(&base, &updates);
        assert_eq!(merged, json!({"a": 2, "b": 3, "keep": {"nested": true}}));
    }

    #[test]
    fn merge_config_replaces_non_objects() {
        assert_eq!(merge_config(&json!(1), &json!({"a": 1})), json!({"a": 1}));
        assert_eq!(merge_config(&json!({"a": 1}), &json!(null)), json!(null));
    }

    #[test]
    fn component_round_trips_with_wire_names() {
        let comp = ComponentInstance {
            id: "abc123def".to_string(),
            kind: "investments-hero".to_string(),
            title: "Net Worth".to_string(),
            config: json!({"totalNetWorth": 1000.0}),
            w: GridSpan::Two,
            h: GridSpan::One,
        };
        let value = serde_json::to_value(&comp).unwrap();
        assert_eq!(value["type"], "investments-hero");
        assert_eq!(value["w"], 2);
        let back: ComponentInstance = serde_json::from_value(value).unwrap();
        assert_eq!(back, comp);
    }

    #[test]
    fn default_snapshot_has_home_section() {
        let snap = Snapshot::default();
        assert_eq!(snap.sections.len(), 1);
        assert_eq!(snap.sections[0].id, "home");
        assert_eq!(snap.active_section_id.as_deref(), Some("home"));
        assert!(snap.sections[0].components.is_empty());
    }
}
