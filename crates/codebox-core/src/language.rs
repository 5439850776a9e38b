//! Language registry — the closed set of languages the sandbox can execute

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SandboxError;

/// A language the sandbox knows how to compile and/or run.
///
/// The set is closed on purpose: every variant carries a file-naming rule
/// and a toolchain requirement, so adding a language means teaching the
/// engine a new compile/run recipe, not just a new string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Cpp,
    Java,
}

impl Language {
    /// All supported languages, in display order.
    pub fn all() -> [Language; 4] {
        [
            Language::Python,
            Language::Javascript,
            Language::Cpp,
            Language::Java,
        ]
    }

    /// The canonical lowercase tag (`python`, `javascript`, `cpp`, `java`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Cpp => "cpp",
            Language::Java => "java",
        }
    }

    /// Human-readable name for CLI and doctor output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Javascript => "JavaScript",
            Language::Cpp => "C++",
            Language::Java => "Java",
        }
    }

    /// Source file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::Javascript => "js",
            Language::Cpp => "cpp",
            Language::Java => "java",
        }
    }

    /// Whether a compile phase runs before execution.
    pub fn is_compiled(&self) -> bool {
        matches!(self, Language::Cpp | Language::Java)
    }

    /// Map a file extension back to a language (used for CLI inference).
    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext.to_ascii_lowercase().as_str() {
            "py" => Some(Language::Python),
            "js" | "mjs" => Some(Language::Javascript),
            "cpp" | "cc" | "cxx" => Some(Language::Cpp),
            "java" => Some(Language::Java),
            _ => None,
        }
    }
}

impl FromStr for Language {
    type Err = SandboxError;

    /// Case-insensitive parse of exactly the four supported tags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" => Ok(Language::Python),
            "javascript" => Ok(Language::Javascript),
            "cpp" => Ok(Language::Cpp),
            "java" => Ok(Language::Java),
            other => Err(SandboxError::UnsupportedLanguage {
                language: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported() {
        assert_eq!("python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!(
            "javascript".parse::<Language>().unwrap(),
            Language::Javascript
        );
        assert_eq!("cpp".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!("java".parse::<Language>().unwrap(), Language::Java);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("Python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("JAVA".parse::<Language>().unwrap(), Language::Java);
        assert_eq!(
            "JavaScript".parse::<Language>().unwrap(),
            Language::Javascript
        );
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "ruby".parse::<Language>().unwrap_err();
        assert_eq!(err.to_string(), "Language ruby not supported.");

        assert!("".parse::<Language>().is_err());
        assert!("c++".parse::<Language>().is_err());
        assert!("js".parse::<Language>().is_err());
    }

    #[test]
    fn test_extensions() {
        assert_eq!(Language::Python.extension(), "py");
        assert_eq!(Language::Javascript.extension(), "js");
        assert_eq!(Language::Cpp.extension(), "cpp");
        assert_eq!(Language::Java.extension(), "java");
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("py"), Some(Language::Python));
        assert_eq!(Language::from_extension("cc"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("JAVA"), Some(Language::Java));
        assert_eq!(Language::from_extension("rs"), None);
    }

    #[test]
    fn test_is_compiled() {
        assert!(!Language::Python.is_compiled());
        assert!(!Language::Javascript.is_compiled());
        assert!(Language::Cpp.is_compiled());
        assert!(Language::Java.is_compiled());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Language::Cpp).unwrap();
        assert_eq!(json, "\"cpp\"");
        let parsed: Language = serde_json::from_str("\"java\"").unwrap();
        assert_eq!(parsed, Language::Java);
    }

    #[test]
    fn test_all_covers_every_variant() {
        let all = Language::all();
        assert_eq!(all.len(), 4);
        for language in all {
            // round-trips through the string tag
            assert_eq!(language.as_str().parse::<Language>().unwrap(), language);
        }
    }
}
