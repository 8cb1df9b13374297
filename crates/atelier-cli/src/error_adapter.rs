//! Error adapter for converting AtelierError to miette diagnostics.
//!
//! Engine errors carry no source spans, so the adapter only contributes a
//! stable error code per variant; miette handles the terminal formatting.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use atelier::AtelierError;

/// Adapter wrapping an [`AtelierError`] for miette rendering.
pub struct ErrorAdapter<'a>(pub &'a AtelierError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            AtelierError::Io(_) => "atelier::io",
            AtelierError::Config(_) => "atelier::config",
            AtelierError::Manifest(_) => "atelier::manifest",
            AtelierError::Layout(_) => "atelier::layout",
            AtelierError::State(_) => "atelier::state",
            AtelierError::Export(_) => "atelier::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            AtelierError::Manifest(_) => {
                Some(Box::new("expected a JSON array of artifact entries"))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_code_per_variant() {
        let err = AtelierError::Config("bad".to_owned());
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "atelier::config");

        let err = AtelierError::Manifest("bad".to_owned());
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "atelier::manifest");
        assert!(adapter.help().is_some());
    }

    #[test]
    fn test_display_passes_through() {
        let err = AtelierError::State("missing blob".to_owned());
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.to_string(), "State error: missing blob");
        assert!(adapter.source().is_none());
    }
}
