//! Recursive-descent parsing of criterion text

use trialmatch_ast::{EligibilityFunction, EligibilityRule};
use trialmatch_diagnostics::{
    Result, TrialError, TRM0001, TRM0002, TRM0003, TRM0004, TRM0005,
};

/// Parse a criterion string into an eligibility function tree
///
/// Fails on unbalanced delimiters, unknown rule names, and composite-rule
/// names outside `AND`/`OR`/`NOT`/`WARN_IF`. All failures are configuration
/// errors: the caller is expected to abort the whole load.
pub fn parse(criterion: &str) -> Result<EligibilityFunction> {
    parse_segment(criterion, criterion)
}

/// Parse one segment of the original criterion, recursing into composites.
/// `criterion` is the full original text, carried for error reporting.
fn parse_segment(segment: &str, criterion: &str) -> Result<EligibilityFunction> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return Err(TrialError::parse(TRM0005, "criterion is empty", criterion));
    }

    if let Some(open) = trimmed.find('(') {
        parse_composite(trimmed, open, criterion)
    } else if let Some(open) = trimmed.find('[') {
        parse_parameterized_leaf(trimmed, open, criterion)
    } else {
        let rule = lookup_rule(trimmed, criterion)?;
        Ok(EligibilityFunction::leaf(rule, []))
    }
}

/// Parse a composite call: `RULE(inner)` with at most one top-level split.
/// `open` is the byte index of the first `(` in `segment`.
fn parse_composite(segment: &str, open: usize, criterion: &str) -> Result<EligibilityFunction> {
    let rule = lookup_rule(segment[..open].trim(), criterion)?;
    if !rule.is_composite() {
        return Err(TrialError::parse(
            TRM0003,
            format!("'{}' is not a valid composite rule", rule),
            criterion,
        ));
    }

    // Text strictly between the first '(' and the matching last ')'
    let close = segment
        .rfind(')')
        .filter(|&close| close > open)
        .ok_or_else(|| {
            TrialError::parse(TRM0004, "unbalanced parentheses", criterion)
        })?;
    let inner = &segment[open + 1..close];

    // The grammar splits into at most two segments per level; the split
    // point detection is a wire-format contract and must not be replaced
    // by general N-ary comma splitting.
    let children = match top_level_split(inner) {
        Some(split) => vec![
            parse_segment(&inner[..split], criterion)?,
            parse_segment(&inner[split + 1..], criterion)?,
        ],
        None => vec![parse_segment(inner, criterion)?],
    };

    Ok(EligibilityFunction::composite(rule, children))
}

/// Parse a parameterized leaf: `RULE[literal]`. Only one bracket group is
/// ever read; text after the first ']' is not part of the grammar.
/// `open` is the byte index of the first `[` in `segment`.
fn parse_parameterized_leaf(
    segment: &str,
    open: usize,
    criterion: &str,
) -> Result<EligibilityFunction> {
    let rule = lookup_rule(segment[..open].trim(), criterion)?;
    if rule.is_composite() {
        return Err(TrialError::parse(
            TRM0001,
            format!("composite rule '{}' cannot take a literal parameter", rule),
            criterion,
        ));
    }

    let close = segment
        .find(']')
        .filter(|&close| close > open)
        .ok_or_else(|| TrialError::parse(TRM0004, "unbalanced brackets", criterion))?;
    let literal = segment[open + 1..close].trim().to_string();

    Ok(EligibilityFunction::leaf(rule, [literal]))
}

fn lookup_rule(name: &str, criterion: &str) -> Result<EligibilityRule> {
    EligibilityRule::from_name(name).ok_or_else(|| {
        TrialError::parse(
            TRM0002,
            format!("unknown eligibility rule '{}'", name),
            criterion,
        )
    })
}

/// Find the single top-level split point of a composite call's inner text.
///
/// Scans left to right counting `(` into `parenthesis_count` and `,` into
/// `comma_count`; the split point is the first comma at which
/// `comma_count > parenthesis_count`. Existing trial configuration text
/// depends on this exact behavior, so the two-counter scan is preserved
/// verbatim rather than generalized.
fn top_level_split(inner: &str) -> Option<usize> {
    let mut parenthesis_count = 0usize;
    let mut comma_count = 0usize;
    for (index, ch) in inner.char_indices() {
        match ch {
            '(' => parenthesis_count += 1,
            ',' => {
                comma_count += 1;
                if comma_count > parenthesis_count {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_pair() {
        assert_eq!(top_level_split("A, B"), Some(1));
    }

    #[test]
    fn test_split_skips_nested_comma() {
        // The comma inside RULE_A(1,2) must not become a top-level split
        // point; the segments are exactly two.
        let inner = "RULE_A(1,2), RULE_B";
        let split = top_level_split(inner).unwrap();
        assert_eq!(&inner[..split], "RULE_A(1,2)");
        assert_eq!(inner[split + 1..].trim(), "RULE_B");
    }

    #[test]
    fn test_split_single_segment() {
        assert_eq!(top_level_split("RULE_A"), None);
        assert_eq!(top_level_split("RULE_A(1,2)"), None);
    }

    #[test]
    fn test_split_finds_first_top_level_comma() {
        // Binary grammar: everything after the first top-level comma is one
        // segment, even if it holds further commas.
        let inner = "A, AND(B, C)";
        assert_eq!(top_level_split(inner), Some(1));
    }
}
