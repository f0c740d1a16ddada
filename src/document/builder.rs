//! Reference document builders.
//!
//! These stand in for a real tokenizer/tagger so a board can be populated
//! without external collaborators.

use unicode_segmentation::UnicodeSegmentation;

use super::{Document, Sentence, Token};

impl Document {
    /// Build an untagged document from raw text.
    ///
    /// Paragraphs (runs of non-blank lines) become sections, Unicode sentence
    /// bounds become sentences and Unicode word bounds, minus whitespace,
    /// become tokens.
    pub fn from_text(text: &str) -> Self {
        let mut doc = Document::new(text);
        for paragraph in paragraphs(text) {
            let section = doc.attach_section_unchecked();
            for raw in paragraph.split_sentence_bounds() {
                let raw = raw.trim();
                if raw.is_empty() {
                    continue;
                }
                let mut sentence = Sentence::new(raw);
                for word in raw.split_word_bounds() {
                    if !word.trim().is_empty() {
                        sentence.push(Token::new(word));
                    }
                }
                doc.attach_sentence_unchecked(section, sentence);
            }
        }
        doc
    }

    /// Build a document from pre-tagged text: one sentence per line written
    /// as `word/TAG word/TAG ...`; blank lines separate sections.
    ///
    /// The raw text is the sentence texts joined by newlines.
    pub fn from_tagged_text(text: &str) -> Self {
        let sentences: Vec<Vec<Sentence>> = paragraphs(text)
            .into_iter()
            .map(|paragraph| paragraph.lines().map(Sentence::from_tagged).collect())
            .collect();
        let raw_text = sentences
            .iter()
            .flatten()
            .map(Sentence::text)
            .collect::<Vec<_>>()
            .join("\n");

        let mut doc = Document::new(raw_text);
        for paragraph in sentences {
            let section = doc.attach_section_unchecked();
            for sentence in paragraph {
                doc.attach_sentence_unchecked(section, sentence);
            }
        }
        doc
    }

    // The root is always a composite and fresh sections are composites,
    // so these attachments cannot fail.
    fn attach_section_unchecked(&mut self) -> super::ComponentId {
        let root = self.root();
        match self.add_section(root, None) {
            Ok(id) => id,
            Err(_) => unreachable!("document root is a composite"),
        }
    }

    fn attach_sentence_unchecked(&mut self, section: super::ComponentId, sentence: Sentence) {
        if self.add_sentence(section, sentence).is_err() {
            unreachable!("sections are composites");
        }
    }
}

/// Split text into paragraphs: maximal runs of non-blank lines.
fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join("\n"));
    }
    out
}
