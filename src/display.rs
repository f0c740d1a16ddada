use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use crate::{Board, Scope};

/// Renders each sentence of a board with the candidates found in it
/// underlined.
//
// Rust  crates               <- tokens, two spaces apart
// ╰──────────╯rust crates    <- occurrence span and canonical key
// ╰──╯rust  score=1.50       <- optional features
pub struct BoardDisplay<'a> {
    board: &'a Board,
    scope: Scope,
    features: Vec<String>,
}

struct Underline {
    start_idx: usize,
    end_idx: usize,
    label: String,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        BoardDisplay {
            board,
            scope: Scope::Document,
            features: Vec::new(),
        }
    }

    /// Only render sentences under `scope`.
    pub fn scoped(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Print the named feature after each candidate that carries it.
    pub fn include_feature(&mut self, name: &str) {
        self.features.push(name.to_string());
    }

    /// Takes self
    pub fn with_feature(mut self, name: &str) -> Self {
        self.include_feature(name);
        self
    }

    fn underlines(&self, unit: crate::ComponentId) -> Vec<Underline> {
        let mut lines = Vec::new();
        for gram in self.board.grams_in(unit) {
            let mut label = gram.key().to_string();
            for name in &self.features {
                if let Some(value) = gram.features.get(name) {
                    label.push_str(&format!("  {}={:.2}", name, value));
                }
            }
            for occurrence in gram.occurrences().iter().filter(|o| o.unit == unit) {
                lines.push(Underline {
                    start_idx: occurrence.start_idx,
                    end_idx: occurrence.end_idx,
                    label: label.clone(),
                });
            }
        }
        lines.sort_by_key(|line| (line.start_idx, line.end_idx));
        lines
    }
}

impl<'a> std::fmt::Display for BoardDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;
        let sentences = self.board.sentences(self.scope).map_err(|_| std::fmt::Error)?;

        for (sentence_idx, (unit, sentence)) in sentences.into_iter().enumerate() {
            if sentence_idx > 0 {
                f.write_str("\n\n")?;
            }

            let mut token_idx_to_start_display_char_idx = Vec::new();
            let mut token_idx_to_end_display_char_idx = Vec::new();
            let mut opening_line = String::new();
            for (token_idx, token) in sentence.tokens().iter().enumerate() {
                if token_idx > 0 {
                    opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
                }
                token_idx_to_start_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
                opening_line.push_str(token.text());
                token_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            }
            f.write_str(&opening_line)?;

            for line in self.underlines(unit) {
                let (Some(&start_char_idx), Some(&end_char_idx)) = (
                    token_idx_to_start_display_char_idx.get(line.start_idx),
                    token_idx_to_end_display_char_idx.get(line.end_idx),
                ) else {
                    continue;
                };
                f.write_char('\n')?;
                for _ in 0..start_char_idx {
                    f.write_char(' ')?;
                }

                f.write_char('╰')?;

                let char_len = end_char_idx.saturating_sub(start_char_idx);
                for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                    f.write_char('─')?;
                }

                if char_len > 1 {
                    f.write_char('╯')?;
                }

                f.write_str(&line.label)?;
            }
        }

        Ok(())
    }
}
