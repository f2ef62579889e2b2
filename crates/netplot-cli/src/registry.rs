//! Output format registry.

use netplot_core::{Error, Frontend};
use netplot_core::Result;
use netplot_dot::DotFrontend;
use netplot_json::JsonFrontend;

/// Frontends selectable by format name, in listing order.
pub struct Registry {
    frontends: Vec<Box<dyn Frontend>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Registry with every built-in format.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(DotFrontend));
        registry.register(Box::new(JsonFrontend));
        registry
    }

    pub fn empty() -> Self {
        Self {
            frontends: Vec::new(),
        }
    }

    /// Add a frontend. A later registration shadows an earlier one of the same name.
    pub fn register(&mut self, frontend: Box<dyn Frontend>) {
        self.frontends.insert(0, frontend);
    }

    pub fn lookup(&self, format: &str) -> Result<&dyn Frontend> {
        self.frontends
            .iter()
            .find(|f| f.format() == format)
            .map(|f| f.as_ref())
            .ok_or_else(|| {
                Error::unsupported(format!("unknown output format '{format}'"))
                    .with_operation("registry::lookup")
                    .with_context("known", self.names().join(","))
            })
    }

    /// Registered format names, oldest registration first.
    pub fn names(&self) -> Vec<&'static str> {
        self.frontends.iter().rev().map(|f| f.format()).collect()
    }

    /// `format - description` lines for `--list-formats`.
    pub fn listing(&self) -> String {
        self.frontends
            .iter()
            .rev()
            .map(|f| format!("{} - {}\n", f.format(), f.description()))
            .collect()
    }
}
