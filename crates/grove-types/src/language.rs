use std::fmt;

use serde::{Deserialize, Serialize};

/// Advisory language tag attached to a file.
///
/// The language travels with the file for the benefit of the editing
/// surface and the inference collaborator; the engine itself never
/// interprets it. Unknown extensions map to [`Language::Plain`], and
/// exotic tags round-trip through [`Language::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    JavaScript,
    Html,
    Css,
    Json,
    Markdown,
    Rust,
    Python,
    /// Plain text: the fallback for unrecognized extensions.
    Plain,
    /// A language tag outside the built-in set.
    Other(String),
}

impl Language {
    /// Derive a language from a file name's extension.
    ///
    /// Names without a recognized extension yield [`Language::Plain`].
    pub fn from_file_name(name: &str) -> Self {
        let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        match extension.to_ascii_lowercase().as_str() {
            "ts" | "tsx" => Self::TypeScript,
            "js" | "jsx" | "mjs" => Self::JavaScript,
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "json" => Self::Json,
            "md" | "markdown" => Self::Markdown,
            "rs" => Self::Rust,
            "py" => Self::Python,
            _ => Self::Plain,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeScript => write!(f, "typescript"),
            Self::JavaScript => write!(f, "javascript"),
            Self::Html => write!(f, "html"),
            Self::Css => write!(f, "css"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
            Self::Rust => write!(f, "rust"),
            Self::Python => write!(f, "python"),
            Self::Plain => write!(f, "plain"),
            Self::Other(tag) => write!(f, "{tag}"),
        }
    }
}
