//! Interface properties and the print mask that selects which of them are shown.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use netplot_error::{Error, Result};

/// Category a property belongs to. Each category owns one bit of a [`PrintMask`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PropCategory {
    /// Runtime state: operational status, carrier, counters.
    State,
    /// Configuration: addresses, MTU, tunables.
    #[strum(to_string = "config", serialize = "configuration")]
    #[serde(alias = "configuration")]
    Config,
}

impl PropCategory {
    pub fn bit(self) -> u32 {
        match self {
            PropCategory::State => 1 << 0,
            PropCategory::Config => 1 << 1,
        }
    }
}

/// Set of visible property categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrintMask(u32);

impl PrintMask {
    pub fn all() -> Self {
        Self(PropCategory::iter().fold(0, |mask, category| mask | category.bit()))
    }

    pub fn none() -> Self {
        Self(0)
    }

    pub fn visible(self, category: PropCategory) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn with(self, category: PropCategory) -> Self {
        Self(self.0 | category.bit())
    }

    pub fn without(self, category: PropCategory) -> Self {
        Self(self.0 & !category.bit())
    }
}

impl Default for PrintMask {
    fn default() -> Self {
        Self::all()
    }
}

impl FromStr for PrintMask {
    type Err = Error;

    /// Parse a comma separated category list, e.g. `state,config`, `all` or `none`.
    fn from_str(s: &str) -> Result<Self> {
        let mut mask = PrintMask::none();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token {
                "all" => mask = PrintMask::all(),
                "none" => {}
                other => {
                    let category = PropCategory::from_str(other).map_err(|_| {
                        Error::config_invalid(format!("unknown property category '{other}'"))
                            .with_operation("label::parse_mask")
                            .with_context("token", other)
                    })?;
                    mask = mask.with(category);
                }
            }
        }
        Ok(mask)
    }
}

impl fmt::Display for PrintMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = PropCategory::iter()
            .filter(|c| self.visible(*c))
            .map(|c| c.to_string())
            .collect();
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join(","))
        }
    }
}

/// A categorized key/value annotation on an interface. Keys may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub category: PropCategory,
    pub key: String,
    pub value: String,
}

impl Property {
    pub fn new(category: PropCategory, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category,
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn config(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(PropCategory::Config, key, value)
    }

    pub fn state(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(PropCategory::State, key, value)
    }
}

/// Properties of `props` visible under `mask`, in their original order.
pub fn visible_properties(props: &[Property], mask: PrintMask) -> impl Iterator<Item = &Property> {
    props.iter().filter(move |p| mask.visible(p.category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mask_shows_everything() {
        let mask = PrintMask::default();
        assert!(mask.visible(PropCategory::State));
        assert!(mask.visible(PropCategory::Config));
        assert!(!PrintMask::none().visible(PropCategory::State));
    }

    #[test]
    fn test_parse_mask() {
        let mask: PrintMask = "config".parse().unwrap();
        assert!(mask.visible(PropCategory::Config));
        assert!(!mask.visible(PropCategory::State));

        let mask: PrintMask = "state, configuration".parse().unwrap();
        assert_eq!(mask, PrintMask::all());

        let mask: PrintMask = "none".parse().unwrap();
        assert_eq!(mask, PrintMask::none());
    }

    #[test]
    fn test_mask_with_and_without() {
        let mask = PrintMask::none().with(PropCategory::State);
        assert_eq!(mask, "state".parse().unwrap());
        assert_eq!(mask.with(PropCategory::Config), PrintMask::all());
        assert_eq!(PrintMask::all().without(PropCategory::Config), mask);
    }

    #[test]
    fn test_parse_mask_rejects_unknown_category() {
        let err = "state,stats".parse::<PrintMask>().unwrap_err();
        assert_eq!(err.kind(), netplot_error::ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_mask_display() {
        assert_eq!(PrintMask::all().to_string(), "state,config");
        assert_eq!(PrintMask::none().to_string(), "none");
        assert_eq!(PrintMask::all().without(PropCategory::State).to_string(), "config");
    }

    #[test]
    fn test_visible_properties_keeps_order() {
        let props = vec![
            Property::config("mode", "802.3ad"),
            Property::state("carrier", "on"),
            Property::config("mode", "active-backup"),
        ];
        let mask = PrintMask::none().with(PropCategory::Config);
        let values: Vec<&str> = visible_properties(&props, mask)
            .map(|p| p.value.as_str())
            .collect();
        assert_eq!(values, vec!["802.3ad", "active-backup"]);
    }
}
