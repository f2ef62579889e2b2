//! The main Error type for netplot.

use crate::ErrorKind;
use std::fmt;

/// Unified error type for all netplot operations.
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the operation that caused this error
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Get the context key-value pairs
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Get the source error (if any).
    pub fn source_ref(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_ref().map(|e| e.as_ref())
    }

    /// Set the operation that caused this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.operation)?;

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}", self.kind, self.operation)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {:?}", source)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let kind = match err.classify() {
            Category::Io => ErrorKind::IoFailed,
            Category::Syntax | Category::Data | Category::Eof => ErrorKind::DeserializationFailed,
        };
        let mut error = Error::new(kind, err.to_string()).with_operation("json");
        if err.line() > 0 {
            error = error.with_context("line", err.line().to_string());
        }
        error.set_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorKind::DeserializationFailed, err.message().to_string())
            .with_operation("toml")
            .set_source(err)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::new(ErrorKind::Unexpected, msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::new(ErrorKind::Unexpected, msg)
    }
}

impl Error {
    /// Create an Unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Create an Unsupported error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unsupported, message)
    }

    /// Create a ConfigInvalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a NamespaceNotFound error
    pub fn namespace_not_found(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self::new(
            ErrorKind::NamespaceNotFound,
            format!("namespace '{}' not found", namespace),
        )
        .with_context("namespace", namespace)
    }

    /// Create an InterfaceNotFound error
    pub fn interface_not_found(interface: impl Into<String>) -> Self {
        let interface = interface.into();
        Self::new(
            ErrorKind::InterfaceNotFound,
            format!("interface '{}' not found", interface),
        )
        .with_context("interface", interface)
    }

    /// Create a DuplicateInterface error
    pub fn duplicate_interface(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(
            ErrorKind::DuplicateInterface,
            format!("interface '{}' defined twice", name),
        )
        .with_context("namespace", namespace)
        .with_context("interface", name)
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(ErrorKind::FileNotFound, format!("file '{}' not found", path))
            .with_context("path", path)
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Create an InvariantViolation error
    pub fn invariant_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvariantViolation, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::InvalidArgument, "interface cannot enslave itself");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.message(), "interface cannot enslave itself");
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::new(ErrorKind::InterfaceNotFound, "not found")
            .with_operation("snapshot::resolve")
            .with_context("namespace", "blue")
            .with_context("interface", "veth0");

        assert_eq!(err.operation(), "snapshot::resolve");
        assert_eq!(err.context().len(), 2);
        assert_eq!(err.context()[0], ("namespace", "blue".to_string()));
    }

    #[test]
    fn test_operation_chaining() {
        let err = Error::new(ErrorKind::IoFailed, "broken pipe")
            .with_operation("dot::render")
            .with_operation("cli::run");

        assert_eq!(err.operation(), "cli::run");
        assert_eq!(err.context().len(), 1);
        assert_eq!(err.context()[0], ("called", "dot::render".to_string()));
    }

    #[test]
    fn test_broken_pipe_is_io_failed() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err = Error::from(io_err).with_operation("dot::render");
        assert_eq!(err.kind(), ErrorKind::IoFailed);
        assert_eq!(
            err.to_string(),
            "IoFailed at dot::render, context { called: io } => closed"
        );
    }

    #[test]
    fn test_io_not_found_maps_to_file_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from(io_err);
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.source_ref().is_some());
    }

    #[test]
    fn test_json_syntax_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err = Error::from(json_err);
        assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
        assert_eq!(err.operation(), "json");
    }

    #[test]
    fn test_display() {
        let err = Error::interface_not_found("eth9").with_operation("builder::set_link");

        let display = format!("{}", err);
        assert!(display.contains("InterfaceNotFound"));
        assert!(!display.contains("permanent"));
        assert!(display.contains("builder::set_link"));
        assert!(display.contains("interface: eth9"));
    }

    #[test]
    fn test_convenience_constructors() {
        let err = Error::namespace_not_found("red");
        assert_eq!(err.kind(), ErrorKind::NamespaceNotFound);
        assert!(err.message().contains("red"));

        let err = Error::duplicate_interface("red", "lo");
        assert_eq!(err.kind(), ErrorKind::DuplicateInterface);
        assert_eq!(err.context().len(), 2);

        let err = Error::unsupported("svg");
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }
}
