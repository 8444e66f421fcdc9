//! Minimal glob matching: `*` and `?` wildcards, everything else literal.

use regex_lite::Regex;

use crate::error::{LoaderError, LoaderResult};

/// A compiled file-name glob.
#[derive(Debug, Clone)]
pub(crate) struct Glob {
    regex: Regex,
    /// Match against the relative path instead of just the file name.
    match_path: bool,
}

impl Glob {
    pub(crate) fn new(pattern: &str) -> LoaderResult<Self> {
        let regex = Regex::new(&wildcard_to_regex(pattern)).map_err(|e| {
            LoaderError::InvalidPattern {
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            regex,
            match_path: pattern.contains('/'),
        })
    }

    /// `file_name` is the last path component; `relative` uses `/` separators.
    pub(crate) fn matches(&self, file_name: &str, relative: &str) -> bool {
        if self.match_path {
            self.regex.is_match(relative)
        } else {
            self.regex.is_match(file_name)
        }
    }
}

fn wildcard_to_regex(pattern: &str) -> String {
    let mut regex = String::from("^");
    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            // `**/` matches zero or more directories.
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    regex.push_str("(?:.*/)?");
                } else {
                    regex.push_str(".*");
                }
            }
            '*' => regex.push_str("[^/]*"),
            '?' => regex.push_str("[^/]"),
            other => regex.push_str(&regex_lite::escape(&other.to_string())),
        }
    }
    regex.push('$');
    regex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_matches_extension() {
        let g = Glob::new("*.pdf").unwrap();
        assert!(g.matches("book.pdf", "nested/book.pdf"));
        assert!(!g.matches("book.pdf.bak", "book.pdf.bak"));
        assert!(!g.matches("bookpdf", "bookpdf"));
    }

    #[test]
    fn question_mark_matches_one_char() {
        let g = Glob::new("ch?.txt").unwrap();
        assert!(g.matches("ch1.txt", "ch1.txt"));
        assert!(!g.matches("ch10.txt", "ch10.txt"));
    }

    #[test]
    fn slash_switches_to_path_matching() {
        let g = Glob::new("notes/*.md").unwrap();
        assert!(g.matches("a.md", "notes/a.md"));
        assert!(!g.matches("a.md", "other/a.md"));
        assert!(!g.matches("a.md", "notes/deep/a.md"));
    }

    #[test]
    fn double_star_spans_directories() {
        let g = Glob::new("**/*.md").unwrap();
        assert!(g.matches("a.md", "a.md"));
        assert!(g.matches("a.md", "x/y/a.md"));
    }
}
