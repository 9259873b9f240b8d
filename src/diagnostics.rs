use std::fmt::{self, Display};

use derive_more::derive::Display;
use derive_new::new;

use crate::syntax::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Severity {
    #[display("error")]
    Error,
    #[display("warning")]
    Warning,
}

/// Stable identifiers of the problems reported on a parsed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    InvalidEscapeSequence,
    DecimalEscapeTooLarge,
    HexadecimalDigitExpected,
    InvalidUnicodeEscape,
    UnicodeEscapeTooLarge,
    MalformedNumber,
    FeatureNotAvailable,
    ReservedWord,
    VarArgOutsideVarArgFunction,
    BreakOutsideLoop,
    DuplicateLabel,
    UndefinedLabel,
    UnknownAttribute,
    MultipleToBeClosed,
    AssignToConst,
}

impl DiagnosticCode {
    pub fn number(self) -> u16 {
        match self {
            DiagnosticCode::InvalidEscapeSequence => 1,
            DiagnosticCode::DecimalEscapeTooLarge => 2,
            DiagnosticCode::HexadecimalDigitExpected => 3,
            DiagnosticCode::InvalidUnicodeEscape => 4,
            DiagnosticCode::UnicodeEscapeTooLarge => 5,
            DiagnosticCode::MalformedNumber => 6,
            DiagnosticCode::FeatureNotAvailable => 10,
            DiagnosticCode::ReservedWord => 11,
            DiagnosticCode::VarArgOutsideVarArgFunction => 20,
            DiagnosticCode::BreakOutsideLoop => 21,
            DiagnosticCode::DuplicateLabel => 22,
            DiagnosticCode::UndefinedLabel => 23,
            DiagnosticCode::UnknownAttribute => 24,
            DiagnosticCode::MultipleToBeClosed => 25,
            DiagnosticCode::AssignToConst => 26,
        }
    }
}

impl Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LUA{:04}", self.number())
    }
}

/// A recoverable problem found in an otherwise complete tree.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(code: DiagnosticCode, span: Span, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, message.into(), span)
    }

    pub fn warning(code: DiagnosticCode, span: Span, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Warning, message.into(), span)
    }

    pub fn feature_not_available(span: Span, feature: &str) -> Self {
        Self::error(
            DiagnosticCode::FeatureNotAvailable,
            span,
            format!("{feature} are not supported in this Lua version"),
        )
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(DiagnosticCode::InvalidEscapeSequence.to_string(), "LUA0001");
        assert_eq!(DiagnosticCode::MalformedNumber.to_string(), "LUA0006");
        assert_eq!(DiagnosticCode::FeatureNotAvailable.to_string(), "LUA0010");
        assert_eq!(DiagnosticCode::AssignToConst.to_string(), "LUA0026");
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::feature_not_available(Span::new(3, 5), "Bitwise operators");
        assert!(diagnostic.is_error());
        assert_eq!(
            diagnostic.to_string(),
            "error[LUA0010]: Bitwise operators are not supported in this Lua version"
        );
    }
}
