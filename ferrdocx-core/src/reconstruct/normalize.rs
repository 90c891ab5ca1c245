use std::sync::LazyLock;

use regex::Regex;

use crate::consts::ZERO_WIDTH_JOINER;

/// Cleans the raw text captured for one row.
///
/// The code/quantity convention handled by [`CodeQuantityNormalizer`] is
/// specific to one catalogue layout, so the row reconstructor takes the
/// policy as a parameter.
pub trait TextNormalizer {
    fn normalize(&self, raw: &str) -> String;
}

/// `(X` followed by at least six uppercase alphanumerics, never closed.
static OPEN_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(X[A-Z0-9]{6,}$").expect("valid open code regex"));

/// `-> 12` on a line of its own.
static ARROW_QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^->\s*\d+$").expect("valid arrow regex"));

/// `(CODE) -> 12`, the annotation printed under each entry.
static CODE_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\([A-Za-z0-9]+\)\s*->\s*\d+$").expect("valid code quantity regex")
});

/// Removes zero-width joiners and trims the result.
pub fn strip_zero_width(text: &str) -> String {
    text.replace(ZERO_WIDTH_JOINER, "").trim().to_string()
}

/// Repairs `(CODE` / `-> N` line splits and moves the `(CODE) -> N` lines
/// after the description.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeQuantityNormalizer;

impl CodeQuantityNormalizer {
    fn repair(lines: Vec<&str>) -> Vec<String> {
        let mut repaired: Vec<String> = Vec::with_capacity(lines.len());
        let mut iter = lines.into_iter().peekable();

        while let Some(line) = iter.next() {
            if OPEN_CODE.is_match(line) {
                if let Some(next) = iter.next_if(|next| ARROW_QUANTITY.is_match(next)) {
                    repaired.push(format!("{line}) {}", Self::canonical_arrow(next)));
                    continue;
                }
            }

            if ARROW_QUANTITY.is_match(line) {
                if let Some(prev) = repaired.last_mut() {
                    prev.push(' ');
                    prev.push_str(&Self::canonical_arrow(line));
                    continue;
                }
            }

            repaired.push(line.to_string());
        }

        repaired
    }

    /// `->6` and `->   6` both become `-> 6`.
    fn canonical_arrow(line: &str) -> String {
        let digits = line.trim_start_matches("->").trim_start();
        format!("-> {digits}")
    }

    fn reorder(lines: Vec<String>) -> Vec<String> {
        let (codes, mut others): (Vec<_>, Vec<_>) = lines
            .into_iter()
            .partition(|line| CODE_QUANTITY.is_match(line));
        others.extend(codes);
        others
    }
}

impl TextNormalizer for CodeQuantityNormalizer {
    fn normalize(&self, raw: &str) -> String {
        let cleaned = strip_zero_width(raw);
        let lines = cleaned
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();

        Self::reorder(Self::repair(lines)).join("\n")
    }
}
