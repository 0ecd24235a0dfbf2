//! Glyph letters and their type classification

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ParseError;

/// Letter families by the pair of motion kinds they combine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LetterType {
    /// Two shifts (A–V)
    Type1,
    /// Shift and static (W, X, Y, Z, Σ, Δ, θ, Ω)
    Type2,
    /// Shift and dash (W- … Ω-)
    Type3,
    /// Dash and static (Φ, Ψ, Λ)
    Type4,
    /// Two dashes (Φ-, Ψ-, Λ-)
    Type5,
    /// Two statics (α, β, Γ)
    Type6,
}

macro_rules! letters {
    ($($variant:ident => $glyph:literal : $ty:ident),* $(,)?) => {
        /// A pictograph letter
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Letter {
            $($variant,)*
        }

        impl Letter {
            pub const ALL: &'static [Letter] = &[$(Letter::$variant,)*];

            /// The glyph as written in sequences and placement data
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Letter::$variant => $glyph,)*
                }
            }

            pub const fn letter_type(self) -> LetterType {
                match self {
                    $(Letter::$variant => LetterType::$ty,)*
                }
            }
        }

        impl FromStr for Letter {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($glyph => Ok(Letter::$variant),)*
                    _ => Err(ParseError::UnknownName {
                        kind: "letter",
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

letters! {
    A => "A": Type1, B => "B": Type1, C => "C": Type1, D => "D": Type1,
    E => "E": Type1, F => "F": Type1, G => "G": Type1, H => "H": Type1,
    I => "I": Type1, J => "J": Type1, K => "K": Type1, L => "L": Type1,
    M => "M": Type1, N => "N": Type1, O => "O": Type1, P => "P": Type1,
    Q => "Q": Type1, R => "R": Type1, S => "S": Type1, T => "T": Type1,
    U => "U": Type1, V => "V": Type1,

    W => "W": Type2, X => "X": Type2, Y => "Y": Type2, Z => "Z": Type2,
    Sigma => "Σ": Type2, Delta => "Δ": Type2, Theta => "θ": Type2, Omega => "Ω": Type2,

    WDash => "W-": Type3, XDash => "X-": Type3, YDash => "Y-": Type3, ZDash => "Z-": Type3,
    SigmaDash => "Σ-": Type3, DeltaDash => "Δ-": Type3, ThetaDash => "θ-": Type3, OmegaDash => "Ω-": Type3,

    Phi => "Φ": Type4, Psi => "Ψ": Type4, Lambda => "Λ": Type4,

    PhiDash => "Φ-": Type5, PsiDash => "Ψ-": Type5, LambdaDash => "Λ-": Type5,

    Alpha => "α": Type6, Beta => "β": Type6, Gamma => "Γ": Type6,
}

impl Letter {
    /// Φ- and Ψ-: two dashes that share a placement table keyed by color
    pub fn is_phi_or_psi_dash(self) -> bool {
        matches!(self, Letter::PhiDash | Letter::PsiDash)
    }

    /// Λ and Λ-: zero-turn dashes keyed by where the other prop ends
    pub fn is_lambda(self) -> bool {
        matches!(self, Letter::Lambda | Letter::LambdaDash)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Letter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Letter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let glyph = String::deserialize(deserializer)?;
        glyph.parse().map_err(serde::de::Error::custom)
    }
}
