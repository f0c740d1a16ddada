use crate::Token;

/// Leaf of the document tree: an ordered run of tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sentence {
    text: String,
    tokens: Vec<Token>,
}

impl Sentence {
    /// Create an empty sentence over the given raw text span.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens: Vec::new(),
        }
    }

    /// Create a sentence from tokens; the raw text is the tokens joined by spaces.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut sentence = Sentence::default();
        for token in tokens {
            sentence.push(token);
        }
        sentence.text = sentence
            .tokens
            .iter()
            .map(Token::text)
            .collect::<Vec<_>>()
            .join(" ");
        sentence
    }

    /// Parse a pre-tagged sentence written as `word/TAG word/TAG ...`.
    ///
    /// The tag is split off at the last `/`; a word without one stays untagged.
    pub fn from_tagged(line: &str) -> Self {
        Self::from_tokens(line.split_whitespace().map(|item| match item.rsplit_once('/') {
            Some((word, tag)) if !word.is_empty() && !tag.is_empty() => Token::tagged(word, tag),
            _ => Token::new(item),
        }))
    }

    /// Append a token, assigning its index within this sentence.
    pub fn push(&mut self, mut token: Token) {
        token.set_index(self.tokens.len());
        self.tokens.push(token);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_indices() {
        let sentence = Sentence::from_tokens(vec![Token::new("a"), Token::new("b")]);
        assert_eq!(sentence.tokens()[1].index(), 1);
        assert_eq!(sentence.text(), "a b");
    }

    #[test]
    fn from_tagged_splits_on_last_slash() {
        let sentence = Sentence::from_tagged("Deep/JJ learning/NN and/or/CC it");
        let tags: Vec<Option<&str>> = sentence.tokens().iter().map(|t| t.tag.as_deref()).collect();
        assert_eq!(tags, vec![Some("JJ"), Some("NN"), Some("CC"), None]);
        assert_eq!(sentence.tokens()[2].text(), "and/or");
        assert_eq!(sentence.text(), "Deep learning and/or it");
    }
}
