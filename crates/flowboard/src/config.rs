//! JSON-backed configuration.
//!
//! Defaults live in [`FlowConfig::default`]; callers override any subset by merging a JSON
//! object on top (`FlowConfig::from_json_str`, `deep_merge`, `set_value`). Typed views are
//! decoded on demand and fail with [`Error::Config`].

use crate::error::{Error, Result};
use crate::sync::LayoutPolicy;
use flowboard_layout::{LayoutOptions, Point};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq)]
pub struct FlowConfig(Value);

impl Default for FlowConfig {
    fn default() -> Self {
        Self(json!({
            "layout": {
                "rankdir": "TB",
                "nodesep": 50.0,
                "ranksep": 50.0,
                "marginx": 0.0,
                "marginy": 0.0,
                "nodeWidth": 250.0,
                "nodeHeight": 100.0,
                "orderPasses": 4
            },
            "sync": {
                "policy": "resetAll"
            },
            "duplicate": {
                "offsetX": 40.0,
                "offsetY": 120.0
            }
        }))
    }
}

impl FlowConfig {
    /// Defaults with `overrides` (a JSON object) merged on top.
    pub fn from_json_str(overrides: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(overrides).map_err(|e| Error::Config {
            message: format!("malformed JSON: {e}"),
        })?;
        if !value.is_object() {
            return Err(Error::Config {
                message: "overrides must be a JSON object".to_string(),
            });
        }
        let mut cfg = Self::default();
        cfg.deep_merge(&value);
        Ok(cfg)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    fn section<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.get(path).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| Error::Config {
            message: format!("`{path}`: {e}"),
        })
    }

    pub fn layout_options(&self) -> Result<LayoutOptions> {
        let opts: LayoutOptions = self.section("layout")?;
        let sizes = [opts.node_width, opts.node_height, opts.nodesep, opts.ranksep];
        if sizes.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::Config {
                message: "`layout` sizes and separations must be finite and non-negative"
                    .to_string(),
            });
        }
        Ok(opts)
    }

    pub fn layout_policy(&self) -> Result<LayoutPolicy> {
        self.section("sync.policy")
    }

    /// Step added per same-kind node when placing a duplicate.
    pub fn duplicate_offset(&self) -> Result<Point> {
        let read = |key: &str| -> Result<f64> {
            let path = format!("duplicate.{key}");
            match self.get_f64(&path) {
                Some(v) if v.is_finite() => Ok(v),
                _ => Err(Error::Config {
                    message: format!("`{path}` must be a finite number"),
                }),
            }
        };
        Ok(Point::new(read("offsetX")?, read("offsetY")?))
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
