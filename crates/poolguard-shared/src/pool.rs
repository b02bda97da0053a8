//! Pool status records as reported by the backend's zpool parser

use std::collections::HashMap;

/// Single property of a pool, dataset or snapshot. `hmac` is the opaque
/// identifier handed back to the server when the property names something
/// that can be operated on (a dataset, a file path)
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Property {
    pub name: String,
    pub value: String,
    #[serde(rename = "HMAC", default)]
    pub hmac: String,
}

/// Pool wide status
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pool {
    pub name: String,
    pub state: String,
    pub status: String,
    pub scan: String,
    pub scanned: f64,
    pub scan_paused: bool,
    pub action: String,
    pub see: String,
    #[serde(default)]
    pub containers: Vec<Container>,
    pub errors: String,
    pub raw: String,
    #[serde(default)]
    pub datasets: Vec<HashMap<String, Property>>,
    #[serde(default)]
    pub snapshots: Vec<HashMap<String, Property>>,
    #[serde(default)]
    pub properties: HashMap<String, Property>,
}

/// VDEV or VDEV member status
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Container {
    pub name: String,
    pub state: String,
    pub read: String,
    pub write: String,
    pub cksum: String,
    pub status: String,
    pub level: i32,
}

/// Reused to represent datasets and snapshots. `internal` carries properties
/// the UI needs but never displays (currently the keylocation)
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Data {
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(default)]
    pub properties: HashMap<String, Property>,
    #[serde(default)]
    pub internal: HashMap<String, Property>,
}
