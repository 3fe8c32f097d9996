//! Syntax highlighting for snippet bodies, shared by the TUI preview and the
//! CLI `show` command.

use crate::models::{CodeSnippet, SnippetLanguage};
use once_cell::sync::Lazy;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use syntect::{
    easy::HighlightLines,
    highlighting::{Theme, ThemeSet},
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

const THEME_NAME: &str = "base16-ocean.dark";

fn syntax_for(language: &SnippetLanguage) -> &'static SyntaxReference {
    SYNTAX_SET
        .find_syntax_by_token(language.syntax_token())
        .or_else(|| SYNTAX_SET.find_syntax_by_name(language.display_name()))
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

fn theme() -> Option<&'static Theme> {
    THEME_SET
        .themes
        .get(THEME_NAME)
        .or_else(|| THEME_SET.themes.values().next())
}

/// Highlighted lines for a ratatui paragraph. Falls back to plain text when
/// no theme is available or a line fails to highlight.
pub fn highlight_lines(code: &str, language: &SnippetLanguage, background: Color) -> Vec<Line<'static>> {
    let Some(theme) = theme() else {
        return code.lines().map(|l| Line::from(l.to_string())).collect();
    };
    let mut highlighter = HighlightLines::new(syntax_for(language), theme);

    LinesWithEndings::from(code)
        .map(|line| match highlighter.highlight_line(line, &SYNTAX_SET) {
            Ok(ranges) => Line::from(
                ranges
                    .iter()
                    .map(|(style, text)| {
                        let fg = style.foreground;
                        Span::styled(
                            text.trim_end_matches('\n').to_string(),
                            Style::default()
                                .fg(Color::Rgb(fg.r, fg.g, fg.b))
                                .bg(background),
                        )
                    })
                    .collect::<Vec<_>>(),
            ),
            Err(_) => Line::from(line.trim_end_matches('\n').to_string()),
        })
        .collect()
}

/// Highlighted lines of the snippet last shown in the preview. The event loop
/// redraws several times a second, so syntect only runs when the selection
/// or the record itself changes.
#[derive(Debug, Default)]
pub struct PreviewCache {
    source: Option<CodeSnippet>,
    lines: Vec<Line<'static>>,
}

impl PreviewCache {
    pub fn holds(&self, snippet: &CodeSnippet) -> bool {
        self.source.as_ref() == Some(snippet)
    }

    pub fn lines_for(&mut self, snippet: &CodeSnippet, background: Color) -> &[Line<'static>] {
        if !self.holds(snippet) {
            self.lines = highlight_lines(&snippet.code, &snippet.language_kind(), background);
            self.source = Some(snippet.clone());
        }
        &self.lines
    }
}

/// 24-bit escaped text for printing straight to a terminal
pub fn highlight_for_terminal(code: &str, language: &SnippetLanguage) -> String {
    let Some(theme) = theme() else {
        return code.to_string();
    };
    let mut highlighter = HighlightLines::new(syntax_for(language), theme);
    let mut out = String::new();

    for line in LinesWithEndings::from(code) {
        match highlighter.highlight_line(line, &SYNTAX_SET) {
            Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges, false)),
            Err(_) => out.push_str(line),
        }
    }
    out.push_str("\x1b[0m");
    out
}
