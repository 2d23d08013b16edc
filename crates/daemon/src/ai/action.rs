use std::str::FromStr;

/// The text transformations offered to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAction {
    Rephrase,
    Summarize,
    Expand,
    FixGrammar,
    Continue,
    Shorten,
}

impl TextAction {
    pub const ALL: [TextAction; 6] = [
        TextAction::Rephrase,
        TextAction::Summarize,
        TextAction::Expand,
        TextAction::FixGrammar,
        TextAction::Continue,
        TextAction::Shorten,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextAction::Rephrase => "rephrase",
            TextAction::Summarize => "summarize",
            TextAction::Expand => "expand",
            TextAction::FixGrammar => "fix_grammar",
            TextAction::Continue => "continue",
            TextAction::Shorten => "shorten",
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            TextAction::Rephrase => {
                "Rephrase the following text, keeping its meaning and tone. Reply with the rephrased text only."
            }
            TextAction::Summarize => {
                "Summarize the following text in a few sentences. Reply with the summary only."
            }
            TextAction::Expand => {
                "Expand the following text with more detail and description, keeping the author's voice. Reply with the expanded text only."
            }
            TextAction::FixGrammar => {
                "Fix spelling, grammar and punctuation in the following text without changing its meaning. Reply with the corrected text only."
            }
            TextAction::Continue => {
                "Continue writing the following text for one or two paragraphs in the same style. Reply with the continuation only."
            }
            TextAction::Shorten => {
                "Shorten the following text while keeping its key points. Reply with the shortened text only."
            }
        }
    }

    /// The full prompt sent upstream.
    pub fn prompt(&self, text: &str) -> String {
        format!("{}\n\n{}", self.instruction(), text)
    }
}

impl FromStr for TextAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl std::fmt::Display for TextAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_action() {
        for action in TextAction::ALL {
            assert_eq!(action.as_str().parse::<TextAction>(), Ok(action));
        }
        assert_eq!("translate".parse::<TextAction>(), Err("translate".into()));
        assert!("Rephrase".parse::<TextAction>().is_err());
    }

    #[test]
    fn test_prompt_ends_with_text() {
        let prompt = TextAction::Summarize.prompt("It was a dark and stormy night.");
        assert!(prompt.ends_with("\n\nIt was a dark and stormy night."));
    }
}
