//! Symbolic constants in `domain.EnumName.MEMBER` form
//!
//! Device type templates and home documents refer to presentation-layer
//! constants (device classes, state classes, feature flags) by name, e.g.
//! `cover.CoverEntityFeature.SET_POSITION`. A [`Symbol`] is the parsed form of
//! such a token.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Human readable description of the token shape, used in error messages
pub const SYMBOL_SHAPE: &str = "domain.EnumName.MEMBER";

/// Error type for malformed symbols
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SymbolError {
    #[error("symbol must contain exactly two '.' separators")]
    InvalidFormat,

    #[error("symbol parts cannot be empty")]
    EmptyPart,

    #[error("domain must be lowercase alphanumeric with underscores")]
    InvalidDomainChars,

    #[error("enum name must start with an uppercase letter and be alphanumeric")]
    InvalidEnumName,

    #[error("member must be uppercase alphanumeric with underscores")]
    InvalidMemberChars,
}

/// A parsed symbolic constant, e.g. `sensor.SensorDeviceClass.TEMPERATURE`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol {
    domain: String,
    enum_name: String,
    member: String,
}

impl Symbol {
    /// Create a new symbol from its three parts
    pub fn new(
        domain: impl Into<String>,
        enum_name: impl Into<String>,
        member: impl Into<String>,
    ) -> Result<Self, SymbolError> {
        let domain = domain.into();
        let enum_name = enum_name.into();
        let member = member.into();

        if domain.is_empty() || enum_name.is_empty() || member.is_empty() {
            return Err(SymbolError::EmptyPart);
        }
        if !Self::is_domain(&domain) {
            return Err(SymbolError::InvalidDomainChars);
        }
        if !Self::is_enum_name(&enum_name) {
            return Err(SymbolError::InvalidEnumName);
        }
        if !member
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(SymbolError::InvalidMemberChars);
        }

        Ok(Self {
            domain,
            enum_name,
            member,
        })
    }

    /// Whether a string is meant to be a symbol.
    ///
    /// A string with three dot-separated parts is a candidate when its first
    /// part is a valid domain and its middle part a valid enum name. The member
    /// is not checked here, so a typo such as `cover.CoverEntityFeature.open`
    /// is reported instead of passed through as plain text. File names like
    /// `Mr.Brightside.mp3` and version strings like `1.0.2` are not candidates.
    pub fn is_candidate(s: &str) -> bool {
        let mut parts = s.split('.');
        let (Some(domain), Some(enum_name), Some(_), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        Self::is_domain(domain) && Self::is_enum_name(enum_name)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn enum_name(&self) -> &str {
        &self.enum_name
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    fn is_domain(s: &str) -> bool {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }

    fn is_enum_name(s: &str) -> bool {
        s.chars()
            .next()
            .map(|c| c.is_ascii_uppercase())
            .unwrap_or(false)
            && s.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(SymbolError::InvalidFormat);
        }
        Self::new(parts[0], parts[1], parts[2])
    }
}

impl TryFrom<String> for Symbol {
    type Error = SymbolError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> String {
        symbol.to_string()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.domain, self.enum_name, self.member)
    }
}
