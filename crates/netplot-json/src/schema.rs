//! JSON document schema, version [`FORMAT_VERSION`].
//!
//! Identity-keyed collections are `BTreeMap`s and the document is serialized
//! through `serde_json::Value`, so keys always come out sorted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use netplot_core::{Error, ErrorKind, Result};

/// Bump on any incompatible field change.
pub const FORMAT_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub format: u32,
    pub version: String,
    pub date: String,
    pub root: String,
    pub namespaces: BTreeMap<String, NamespaceRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceRecord {
    pub id: String,
    /// Empty for an unnamed namespace.
    pub name: String,
    pub interfaces: BTreeMap<String, InterfaceRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub id: String,
    pub namespace: String,
    pub name: String,
    /// Empty when unknown.
    pub driver: String,
    /// Visible properties; a repeated key keeps its last value.
    pub info: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<AddressRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,
    /// `internal` or `device`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `none`, `down`, `up_no_link` or `up`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parents: BTreeMap<String, Connection>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, Connection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<Connection>,
}

/// A relationship to another interface with at most one edge label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub target: String,
    pub info: Vec<String>,
}

impl Connection {
    pub fn new(target: impl Into<String>, label: Option<&str>) -> Self {
        Self {
            target: target.into(),
            info: label.map(str::to_string).into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// `INET`, `INET6` or `unknown`.
    pub family: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<Box<AddressRecord>>,
}

impl Document {
    /// Parse a rendered document, rejecting format versions this build does not know.
    pub fn parse(input: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| Error::from(e).with_operation("json::parse"))?;
        let format = value.get("format").and_then(serde_json::Value::as_u64);
        if format != Some(u64::from(FORMAT_VERSION)) {
            return Err(Error::new(
                ErrorKind::InvalidFormat,
                format!("unsupported document format {format:?}"),
            )
            .with_operation("json::parse")
            .with_context("expected", FORMAT_VERSION.to_string()));
        }
        serde_json::from_value(value).map_err(|e| Error::from(e).with_operation("json::parse"))
    }

    pub fn interface_count(&self) -> usize {
        self.namespaces.values().map(|ns| ns.interfaces.len()).sum()
    }

    /// Look up an interface record by id across all namespaces.
    pub fn interface(&self, id: &str) -> Option<&InterfaceRecord> {
        self.namespaces
            .values()
            .find_map(|ns| ns.interfaces.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_info_holds_at_most_one_label() {
        assert!(Connection::new("if1", None).info.is_empty());
        assert_eq!(Connection::new("if1", Some("VLAN 10")).info, vec!["VLAN 10"]);
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let err = Document::parse(
            r#"{"date":"","format":3,"namespaces":{},"root":"ns0","version":"9"}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_parse_accepts_current_format() {
        let doc = Document::parse(
            r#"{"date":"d","format":2,"namespaces":{"ns0":{"id":"ns0","interfaces":{},"name":""}},"root":"ns0","version":"0.4.1"}"#,
        )
        .unwrap();
        assert_eq!(doc.root, "ns0");
        assert_eq!(doc.interface_count(), 0);
        assert!(doc.namespaces["ns0"].warnings.is_empty());
    }
}
