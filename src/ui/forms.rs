use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::query::TuneQuery;

/// Which view a prompt feeds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum PromptKind {
    Book,
    Type,
    Title,
    Key,
}

impl PromptKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            PromptKind::Book => "Enter book number",
            PromptKind::Type => "Enter tune type",
            PromptKind::Title => "Enter search term",
            PromptKind::Key => "Enter key (e.g., G, Dm)",
        }
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            PromptKind::Book => "Show Tunes by Book",
            PromptKind::Type => "Show Tunes by Type",
            PromptKind::Title => "Search Tunes by Title",
            PromptKind::Key => "Show Tunes by Key",
        }
    }
}

/// Single-line input collected before a query runs.
#[derive(Clone, Debug)]
pub(crate) struct PromptForm {
    pub(crate) kind: PromptKind,
    pub(crate) value: String,
    pub(crate) error: Option<String>,
}

impl PromptForm {
    pub(crate) fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            value: String::new(),
            error: None,
        }
    }

    /// Append a printable character. Returns whether the input changed.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    /// Validate the input and turn it into the matching query.
    pub(crate) fn to_query(&self) -> Result<TuneQuery> {
        let value = self.value.trim();
        match self.kind {
            PromptKind::Book => value
                .parse::<i64>()
                .map(TuneQuery::Book)
                .map_err(|_| anyhow!("Book number must be an integer.")),
            PromptKind::Type => Ok(TuneQuery::Type(value.to_string())),
            PromptKind::Title => Ok(TuneQuery::Title(value.to_string())),
            PromptKind::Key => Ok(TuneQuery::Key(value.to_string())),
        }
    }

    /// Render the `Label: value` line for the popup.
    pub(crate) fn build_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::raw(self.prefix()),
            Span::styled(self.value.clone(), Style::default().fg(Color::Yellow)),
        ])
    }

    pub(crate) fn prefix(&self) -> String {
        format!("{}: ", self.kind.label())
    }

    pub(crate) fn value_len(&self) -> usize {
        self.value.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(kind: PromptKind, text: &str) -> PromptForm {
        let mut form = PromptForm::new(kind);
        for ch in text.chars() {
            form.push_char(ch);
        }
        form
    }

    #[test]
    fn book_prompt_requires_integer() {
        assert_eq!(
            form_with(PromptKind::Book, " 3 ").to_query().unwrap(),
            TuneQuery::Book(3)
        );
        let err = form_with(PromptKind::Book, "three").to_query().unwrap_err();
        assert_eq!(err.to_string(), "Book number must be an integer.");
        assert!(form_with(PromptKind::Book, "").to_query().is_err());
    }

    #[test]
    fn text_prompts_keep_trimmed_input() {
        assert_eq!(
            form_with(PromptKind::Key, "Dm ").to_query().unwrap(),
            TuneQuery::Key("Dm".to_string())
        );
    }

    #[test]
    fn control_characters_are_rejected() {
        let mut form = PromptForm::new(PromptKind::Type);
        assert!(!form.push_char('\u{7}'));
        assert!(form.push_char('r'));
        form.backspace();
        assert!(form.value.is_empty());
    }
}
