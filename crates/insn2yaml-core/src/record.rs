use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingVariable {
    pub name: String,
    /// Bit range within the instruction word (e.g. `11-7`).
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoding {
    #[serde(rename = "match")]
    pub match_pattern: String,
    #[serde(default)]
    pub variables: Vec<EncodingVariable>,
}

/// Per privilege mode access descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access {
    pub s: String,
    pub u: String,
    pub vs: String,
    pub vu: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pseudoinstruction {
    pub when: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionRecord {
    /// Leading document comments, including their `#` marker.
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub kind: String,
    pub name: String,
    #[serde(alias = "short_description")]
    pub long_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "definedBy", alias = "isa")]
    pub defined_by: String,
    pub assembly: String,
    pub encoding: Encoding,
    pub access: Access,
    #[serde(default)]
    pub data_independent_timing: bool,
    /// `$ref` targets, in document order.
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub pseudoinstructions: Vec<Pseudoinstruction>,
    #[serde(default, rename = "operation()", alias = "operation")]
    pub operation: String,
    #[serde(default, rename = "sail()", alias = "sail")]
    pub sail: String,
}
