//! Scenario file parser.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use u_loading::unload::ZoneOrder;
use u_loading::{Container, Item, ItemId};

/// Errors that can occur when loading scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid scenario format: {0}")]
    InvalidFormat(String),

    #[error(transparent)]
    Model(#[from] u_loading::Error),
}

/// A container and the items to load into it.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub container: Container,
    /// Items sorted by id.
    pub items: Vec<Item>,
}

impl Scenario {
    /// Zones of the scenario's items in natural order.
    pub fn zone_order(&self) -> ZoneOrder {
        ZoneOrder::natural(self.items.iter().map(|i| i.zone().clone()))
    }

    /// Total volume of all items.
    pub fn item_volume(&self) -> f64 {
        self.items.iter().map(|i| i.volume()).sum()
    }
}

/// Parser for scenario files.
#[derive(Debug, Default)]
pub struct ScenarioParser;

impl ScenarioParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses a scenario from a JSON file. The file stem names the scenario.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut scenario = self.parse_json(&content)?;
        if let Some(stem) = path.file_stem() {
            scenario.name = stem.to_string_lossy().into_owned();
        }
        Ok(scenario)
    }

    /// Parses a scenario from a JSON string.
    pub fn parse_json(&self, json: &str) -> Result<Scenario, ScenarioError> {
        let raw: RawScenario = serde_json::from_str(json)?;
        self.convert_raw_scenario(raw)
    }

    fn convert_raw_scenario(&self, raw: RawScenario) -> Result<Scenario, ScenarioError> {
        if raw.items.is_empty() {
            return Err(u_loading::Error::EmptyScenario.into());
        }

        let [width, length, height] = raw.container_size;
        let container = if raw.apply_efficiency {
            Container::from_nominal(width, length, height)?
        } else {
            Container::new(width, length, height)?
        };

        let mut items = raw
            .items
            .into_iter()
            .map(|(key, item)| self.convert_raw_item(&key, item))
            .collect::<Result<Vec<_>, _>>()?;
        items.sort_by_key(|i| i.id());

        Ok(Scenario {
            name: raw.name.unwrap_or_else(|| "scenario".to_string()),
            container,
            items,
        })
    }

    fn convert_raw_item(&self, key: &str, raw: RawItem) -> Result<Item, ScenarioError> {
        let id: ItemId = key
            .trim()
            .parse()
            .map_err(|_| ScenarioError::InvalidFormat(format!("item id '{}' is not a number", key)))?;

        Ok(Item::new(
            id,
            raw.width,
            raw.length,
            raw.height,
            raw.weight,
            raw.location,
        )?)
    }
}

fn default_true() -> bool {
    true
}

/// Raw scenario as parsed from JSON.
#[derive(Debug, Deserialize)]
struct RawScenario {
    #[serde(default)]
    name: Option<String>,
    container_size: [f64; 3],
    #[serde(default = "default_true")]
    apply_efficiency: bool,
    items: BTreeMap<String, RawItem>,
}

/// Raw item record. Unknown keys such as `spec_id` are ignored.
#[derive(Debug, Deserialize)]
struct RawItem {
    width: f64,
    length: f64,
    height: f64,
    weight: f64,
    location: String,
}
