//! Section slicing of rendered man pages
//!
//! Walks the page line by line and keeps only the whitelisted sections,
//! stopping at the first other section once something was captured.

use crate::utils::text::is_decimal_digit;

const ALLOWED_SECTIONS: [&str; 6] = [
    "NAME",
    "SYNOPSIS",
    "DESCRIPTION",
    "OVERVIEW",
    "OPTIONS",
    "EXAMPLES",
];

const MAX_HEADER_LEN: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionState {
    /// Before the first whitelisted header
    Searching,
    Capturing,
    Stopped,
}

/// A line is a header when it is 1 to 40 characters of uppercase letters,
/// digits, spaces and hyphens. Any lowercase letter disqualifies it.
pub fn is_section_header(line: &str) -> bool {
    let len = line.chars().count();
    if len == 0 || len > MAX_HEADER_LEN {
        return false;
    }
    line.chars().all(|c| {
        c == ' '
            || c == '-'
            || is_decimal_digit(c)
            || (c.is_alphabetic() && c.is_uppercase())
    })
}

/// Text accumulator that counts characters rather than bytes
#[derive(Debug, Default)]
struct Excerpt {
    text: String,
    chars: usize,
}

impl Excerpt {
    fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.chars += s.chars().count();
    }

    fn push_line(&mut self, line: &str) {
        self.push_str(line);
        self.push_str("\n");
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn into_trimmed(self) -> String {
        self.text.trim().to_string()
    }
}

/// Extract the whitelisted sections of `page`, up to roughly `budget`
/// characters. Falls back to [`fallback_excerpt`] when no whitelisted
/// section is found.
pub fn slice_man_sections(page: &str, budget: usize) -> String {
    let mut out = Excerpt::default();
    let mut state = SectionState::Searching;
    let mut sections_captured = 0usize;

    for line in page.lines() {
        if state == SectionState::Stopped {
            break;
        }
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if state == SectionState::Capturing {
                out.push_str("\n");
            }
            continue;
        }

        if is_section_header(trimmed) {
            if ALLOWED_SECTIONS.contains(&trimmed) {
                if !out.is_empty() {
                    out.push_str("\n");
                }
                out.push_line(trimmed);
                state = SectionState::Capturing;
                sections_captured += 1;
            } else if sections_captured > 0 {
                state = SectionState::Stopped;
            }
            continue;
        }

        if state == SectionState::Capturing {
            out.push_line(line);
            if out.chars >= budget {
                state = SectionState::Stopped;
            }
        }
    }

    if sections_captured == 0 {
        return fallback_excerpt(page, budget);
    }
    out.into_trimmed()
}

/// First non-blank lines of `page`, verbatim, up to `budget` characters.
pub fn fallback_excerpt(page: &str, budget: usize) -> String {
    let mut out = Excerpt::default();
    for line in page.lines().filter(|line| !line.trim().is_empty()) {
        out.push_line(line);
        if out.chars >= budget {
            break;
        }
    }
    out.into_trimmed()
}
