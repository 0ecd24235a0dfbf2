//! Error types with diagnostics using miette
//!
//! Only boundary violations and malformed input surface as errors. Table
//! misses inside the engine degrade to documented fallbacks instead.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::PropColor;

// ============================================================================
// Positioning Errors
// ============================================================================

/// Precondition violations at the positioning API boundary
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum PositioningError {
    #[error("pictograph has no motion for the {color} arrow")]
    #[diagnostic(
        code(pictograph::positioning::missing_motion),
        help("every visible arrow needs motion data of the same color")
    )]
    MissingMotion { color: PropColor },

    #[error("pictograph has no letter")]
    #[diagnostic(
        code(pictograph::positioning::missing_letter),
        help("special placements are addressed by letter; use the default-only mode for unlettered pictographs")
    )]
    MissingLetter,
}

// ============================================================================
// Value Errors
// ============================================================================

/// A turn count outside {0, 0.5, 1, 1.5, 2, 2.5, 3}
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq)]
#[error("invalid turns value: {value}")]
#[diagnostic(
    code(pictograph::turns::invalid),
    help("turns must be one of 0, 0.5, 1, 1.5, 2, 2.5, 3 or \"fl\"")
)]
pub struct TurnsError {
    pub value: f64,
}

/// Errors from parsing enum names and letters
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown {kind}: {value:?}")]
    #[diagnostic(code(pictograph::parse::unknown_name))]
    UnknownName { kind: &'static str, value: String },

    #[error("malformed turns tuple: {value:?}")]
    #[diagnostic(
        code(pictograph::parse::turns_tuple),
        help("turns tuples look like \"(1, 0.5)\" or \"(fl, 0)\"")
    )]
    TurnsTuple { value: String },
}

// ============================================================================
// Override Source Errors
// ============================================================================

/// Failures while fetching special placement data
///
/// The override cache treats every one of these as "no override exists".
#[derive(Error, Diagnostic, Debug)]
pub enum OverrideError {
    #[error("failed to read special placements from {path}")]
    #[diagnostic(code(pictograph::overrides::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed special placements in {path}")]
    #[diagnostic(code(pictograph::overrides::json))]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("special placement source unavailable: {message}")]
    #[diagnostic(code(pictograph::overrides::unavailable))]
    Unavailable { message: String },
}
