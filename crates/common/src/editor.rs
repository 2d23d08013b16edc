use serde::{Deserialize, Serialize};

/// Syntax mode an editor should use for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Markdown,
    Javascript,
    Typescript,
    Css,
    Html,
    Json,
    Plaintext,
}

impl Language {
    /// Detect the language from the extension of a file name.
    ///
    /// Screenplays (`.fountain`) have no dedicated mode and edit as plaintext.
    pub fn from_file_name(name: &str) -> Self {
        let extension = match name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return Language::Plaintext,
        };

        match extension.as_str() {
            "md" | "markdown" => Language::Markdown,
            "js" | "jsx" => Language::Javascript,
            "ts" | "tsx" => Language::Typescript,
            "css" => Language::Css,
            "html" => Language::Html,
            "json" => Language::Json,
            _ => Language::Plaintext,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Markdown => "markdown",
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
            Language::Css => "css",
            Language::Html => "html",
            Language::Json => "json",
            Language::Plaintext => "plaintext",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
