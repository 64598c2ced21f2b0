use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One row of a per-position count table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionCount {
    pub hxb2: u32,
    pub label: String,
    pub count: u64,
}

impl PositionCount {
    pub fn new(hxb2: u32, label: impl Into<String>, count: u64) -> Self {
        Self {
            hxb2,
            label: label.into(),
            count,
        }
    }
}

/// One row of the amino-acid count table: a reference coordinate, its
/// position within a protein region, and the count of every variant seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AminoAcidRow {
    pub hxb2: Option<u32>,
    pub region: String,
    pub position: u32,
    pub coverage: u64,
    pub counts: BTreeMap<String, u64>,
}

/// A candidate drug-resistance mutation from the reference list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MutationRecord {
    pub region: String,
    pub position: u32,
    #[serde(default)]
    pub variant: Option<String>,
    pub frequency: f64,
    #[serde(default)]
    pub coverage: Option<u64>,
    /// Listed by the IAS-USA drug resistance mutation list.
    #[serde(rename = "IAS", deserialize_with = "flag")]
    pub ias: bool,
    /// Listed by the Stanford HIVdb.
    #[serde(rename = "Stanford", deserialize_with = "flag")]
    pub stanford: bool,
    /// Listed as a surveillance drug-resistance mutation.
    #[serde(rename = "SDRM", deserialize_with = "flag")]
    pub sdrm: bool,
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "t" | "yes" => Ok(true),
        "0" | "0.0" | "false" | "f" | "no" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected 0/1 evidence flag, found '{}'",
            other
        ))),
    }
}
