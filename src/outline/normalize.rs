//! Indent normalization for numbered tables of contents.
//!
//! Bookmark text copied out of a printed table of contents usually has no
//! indentation, but its section labels (`1`, `1.2`, `1.2.3`) already encode
//! the nesting. [`IndentNormalizer`] rewrites such text so the line
//! classifier sees explicit indentation:
//!
//! | label      | leading spaces |
//! |------------|----------------|
//! | `1.2`      | 2              |
//! | `1.2.3`    | 4              |
//! | other      | 0              |
//!
//! Only three levels are recognized. Titles and page numbers are untouched.

use regex::Regex;

/// Rewrites numbered lines with explicit indentation.
pub struct IndentNormalizer {
    second_level: Regex,
    third_level: Regex,
}

impl IndentNormalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self {
            second_level: Regex::new(r"^\d+\.\d+").unwrap(),
            third_level: Regex::new(r"^\d+\.\d+\.\d+").unwrap(),
        }
    }

    /// Normalize a single line (without its line terminator).
    pub fn normalize_line(&self, line: &str) -> String {
        let content = line.trim_start();
        let label = content.split_whitespace().next().unwrap_or("");

        let indent = if self.third_level.is_match(label) {
            "    "
        } else if self.second_level.is_match(label) {
            "  "
        } else {
            ""
        };

        format!("{}{}", indent, content)
    }

    /// Normalize a whole text. Whitespace-only lines are dropped and every
    /// emitted line ends with `\n`.
    pub fn normalize(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            output.push_str(&self.normalize_line(line));
            output.push('\n');
        }
        output
    }
}

impl Default for IndentNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_level() {
        let n = IndentNormalizer::new();
        assert_eq!(n.normalize_line("1.2 Subsection"), "  1.2 Subsection");
    }

    #[test]
    fn test_third_level() {
        let n = IndentNormalizer::new();
        assert_eq!(
            n.normalize_line("1.2.3 Subsubsection"),
            "    1.2.3 Subsubsection"
        );
    }

    #[test]
    fn test_top_level_unchanged() {
        let n = IndentNormalizer::new();
        assert_eq!(n.normalize_line("1 Chapter"), "1 Chapter");
        assert_eq!(n.normalize_line("Preface 3"), "Preface 3");
    }

    #[test]
    fn test_existing_indent_replaced() {
        let n = IndentNormalizer::new();
        assert_eq!(n.normalize_line("\t  2.1 Setup 9"), "  2.1 Setup 9");
        assert_eq!(n.normalize_line("      Appendix 40"), "Appendix 40");
    }

    #[test]
    fn test_deeper_labels_capped_at_third_level() {
        let n = IndentNormalizer::new();
        assert_eq!(n.normalize_line("1.2.3.4 Deep 5"), "    1.2.3.4 Deep 5");
    }

    #[test]
    fn test_label_must_lead_the_line() {
        let n = IndentNormalizer::new();
        assert_eq!(n.normalize_line("Section 1.2 10"), "Section 1.2 10");
    }

    #[test]
    fn test_normalize_text() {
        let n = IndentNormalizer::new();
        let input = "1 Intro 1\n\n1.1 Scope 2\r\n1.1.1 Terms 3\n   \n2 Usage 5";
        assert_eq!(
            n.normalize(input),
            "1 Intro 1\n  1.1 Scope 2\n    1.1.1 Terms 3\n2 Usage 5\n"
        );
    }
}
