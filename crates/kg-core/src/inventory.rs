//! Inventory line formatting.
//!
//! Each line goes through [`PIPELINE`] in order. Redaction rules run
//! before the colorizers: once brackets and markers are rewritten the
//! durability and price patterns can no longer pair with hidden text.
//! Every rule is a no-op on lines it does not match.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::palette::Paint;

/// A single rewrite step.
pub type Rule = fn(&str) -> String;

/// The formatting rules in application order.
pub const PIPELINE: [(&str, Rule); 8] = [
    ("decode_entities", decode_entities),
    ("redact_hidden", redact_hidden),
    ("redact_partial", redact_partial),
    ("hide_true_name", hide_true_name),
    ("paint_equipped", paint_equipped),
    ("paint_redactions", paint_redactions),
    ("paint_worn_durability", paint_worn_durability),
    ("paint_price", paint_price),
];

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid inventory regex")
}

static HIDDEN: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\?{3}(\(.*?\))|\?{3}([^,}]*),|\?{3}(.+?)\}"));
static PARTIAL: LazyLock<Regex> = LazyLock::new(|| regex(r"([^ {]+)\?{3}"));
static ALIAS: LazyLock<Regex> = LazyLock::new(|| regex(r"\(.+?\)"));
static EQUIPPED: LazyLock<Regex> = LazyLock::new(|| regex(r"(\d+э)\."));
static REDACTION: LazyLock<Regex> = LazyLock::new(|| regex(r"\?{3}"));
static DURABILITY: LazyLock<Regex> = LazyLock::new(|| regex(r"\(([0-9]+?)/([0-9]+?)\)"));
static PRICE: LazyLock<Regex> = LazyLock::new(|| regex(r"[0-9]+?ж"));

/// Split a raw inventory property into lines. An empty property yields one
/// empty line.
pub fn split_lines(raw: &str) -> Vec<&str> {
    raw.split('\n').collect()
}

/// Run one line through the whole pipeline.
pub fn format_line(line: &str) -> String {
    PIPELINE
        .iter()
        .fold(line.to_string(), |acc, (_, rule)| rule(&acc))
}

/// Format every line independently, keeping their order.
pub fn format_inventory<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().map(format_line).collect()
}

/// Decode `&lt;` and `&gt;`.
pub fn decode_entities(line: &str) -> String {
    line.replace("&lt;", "<").replace("&gt;", ">")
}

/// Collapse fully hidden properties: `???(..)` becomes `?`, and a hidden
/// list entry keeps a `???` marker before its `,` or `}`.
pub fn redact_hidden(line: &str) -> String {
    HIDDEN
        .replace_all(line, |caps: &Captures<'_>| {
            if caps.get(1).is_some() {
                "?"
            } else if caps.get(2).is_some() {
                "???,"
            } else {
                "???}"
            }
        })
        .into_owned()
}

/// Collapse partially hidden properties: `visible???` becomes `visible?`.
pub fn redact_partial(line: &str) -> String {
    PARTIAL.replace_all(line, "${1}?").into_owned()
}

/// Drop parenthesized aliases before the property block, then collapse
/// double spaces.
pub fn hide_true_name(line: &str) -> String {
    let line = match line.find('{') {
        Some(i) => {
            let (label, block) = line.split_at(i);
            format!("{}{block}", ALIAS.replace_all(label, ""))
        }
        None => line.to_string(),
    };
    line.replace("  ", " ")
}

/// Highlight the equipped marker, e.g. `3э.`.
pub fn paint_equipped(line: &str) -> String {
    EQUIPPED
        .replace_all(line, |caps: &Captures<'_>| {
            format!("{}.", Paint::Green.paint(&caps[1]))
        })
        .into_owned()
}

/// Highlight every remaining `???` marker.
pub fn paint_redactions(line: &str) -> String {
    REDACTION
        .replace_all(line, Paint::Magenta.paint("???").as_str())
        .into_owned()
}

/// Highlight durability pairs when the first one is at or below a quarter.
pub fn paint_worn_durability(line: &str) -> String {
    let Some(caps) = DURABILITY.captures(line) else {
        return line.to_string();
    };
    let (Ok(current), Ok(max)) = (caps[1].parse::<u64>(), caps[2].parse::<u64>()) else {
        return line.to_string();
    };
    if max == 0 || u128::from(current) * 4 > u128::from(max) {
        return line.to_string();
    }
    DURABILITY
        .replace_all(line, |caps: &Captures<'_>| Paint::Red.paint(&caps[0]))
        .into_owned()
}

/// Highlight prices, e.g. `66ж`.
pub fn paint_price(line: &str) -> String {
    PRICE
        .replace_all(line, |caps: &Captures<'_>| Paint::Yellow.paint(&caps[0]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: &str = "\x1b[32m";
    const M: &str = "\x1b[35m";
    const R: &str = "\x1b[31m";
    const Y: &str = "\x1b[33m";
    const X: &str = "\x1b[0m";

    #[test]
    fn formats_mixed_inventory() {
        let lines = [
            "27ж",
            "1э. test item 1 {???, ???hidden} (1/1)",
            "2. test item 2 {???, shown???hidden, ???(hidden)shown, full} (1/10)",
            "3э. test item 3 (real item name) {something, ???} (2/10)",
            "4. test item 4 {shown, shown2, ???(hidden)shown} (20/20)",
        ];
        let expected = vec![
            format!("{Y}27ж{X}"),
            format!("{G}1э{X}. test item 1 {{{M}???{X}, {M}???{X}}} (1/1)"),
            format!("2. test item 2 {{{M}???{X}, shown?, ?shown, full}} {R}(1/10){X}"),
            format!("{G}3э{X}. test item 3 {{something, {M}???{X}}} {R}(2/10){X}"),
            "4. test item 4 {shown, shown2, ?shown} (20/20)".to_string(),
        ];
        assert_eq!(format_inventory(lines), expected);
    }

    #[test]
    fn formats_shop_listing() {
        let lines = [
            "387ж",
            "1. item1 (aitem1+1) {???prop, ???prop} (30/30) за 66ж",
            "2. item2+1 {???prop, ???prop} (20/20) за 66ж",
            "3. item3 (aitem3) {???prop, ???prop, ???prop} (5/20) за 55ж",
        ];
        let expected = vec![
            format!("{Y}387ж{X}"),
            format!("1. item1 {{{M}???{X}, {M}???{X}}} (30/30) за {Y}66ж{X}"),
            format!("2. item2+1 {{{M}???{X}, {M}???{X}}} (20/20) за {Y}66ж{X}"),
            format!("3. item3 {{{M}???{X}, {M}???{X}, {M}???{X}}} {R}(5/20){X} за {Y}55ж{X}"),
        ];
        assert_eq!(format_inventory(lines), expected);
    }

    #[test]
    fn empty_property_is_one_empty_line() {
        assert_eq!(format_inventory(split_lines("")), vec![String::new()]);
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(decode_entities("&lt;!карта&gt;"), "<!карта>");
    }

    #[test]
    fn hidden_redaction_is_stable() {
        for already in ["?", "???,", "???}", "{???, ???}"] {
            assert_eq!(redact_hidden(already), already);
        }
    }

    #[test]
    fn durability_threshold_is_a_quarter() {
        assert_eq!(paint_worn_durability("(5/20)"), format!("{R}(5/20){X}"));
        assert_eq!(paint_worn_durability("(6/20)"), "(6/20)");
        assert_eq!(paint_worn_durability("(0/0)"), "(0/0)");
    }

    #[test]
    fn alias_kept_without_property_block() {
        assert_eq!(hide_true_name("1. sword (blade)"), "1. sword (blade)");
        assert_eq!(hide_true_name("1. sword (blade) {sharp}"), "1. sword {sharp}");
    }

    #[test]
    fn pipeline_order_is_fixed() {
        let names: Vec<_> = PIPELINE.iter().map(|(name, _)| *name).collect();
        let redact = names.iter().position(|n| *n == "hide_true_name").unwrap();
        assert!(names[redact + 1..].iter().all(|n| n.starts_with("paint_")));
    }
}
