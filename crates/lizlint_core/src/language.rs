//! Languages the scanner is enabled for.

use std::path::Path;

/// A source language lizlint scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Cpp,
}

impl Language {
    /// Looks up a language by LSP language identifier.
    pub fn from_language_id(id: &str) -> Option<Self> {
        match id {
            "cpp" => Some(Self::Cpp),
            _ => None,
        }
    }

    /// Looks up a language by file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "cpp" | "cc" | "cxx" | "c++" | "hpp" | "hh" | "hxx" | "h++" | "h" | "ipp" | "inl" => {
                Some(Self::Cpp)
            }
            _ => None,
        }
    }

    /// LSP language identifier.
    pub const fn language_id(self) -> &'static str {
        match self {
            Self::Cpp => "cpp",
        }
    }
}
