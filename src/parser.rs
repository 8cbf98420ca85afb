//! Scanner that pulls tune metadata out of ABC notation files.
//!
//! Only the `T:`, `R:`, `M:`, and `K:` tag lines matter here; note bodies,
//! comments, and every other header are skipped. A `T:` line starts a new tune,
//! so a file is split into one record per title rather than per blank-line
//! block. Tag lines that appear before the first title form an untitled
//! record of their own.

use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::models::TuneRecord;

/// Read `path` as UTF-8 and parse every tune it contains.
pub fn parse_abc_file(path: &Path) -> Result<Vec<TuneRecord>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|err| CatalogError::io(path, err))?;
    Ok(parse_abc_str(&content))
}

/// Split `content` into tune records.
///
/// Repeated tags inside one tune overwrite each other, so the last occurrence
/// wins. Records with no recognized tag are never emitted.
pub fn parse_abc_str(content: &str) -> Vec<TuneRecord> {
    let mut tunes = Vec::new();
    let mut current = TuneRecord::default();

    // A lone `\r` ends a line too; the empty pieces left by `\r\n` match no tag.
    for raw in content.split(|c: char| c == '\r' || c == '\n') {
        let line = raw.trim();
        if let Some(title) = tag_value(line, "T:") {
            if !current.is_empty() {
                tunes.push(std::mem::take(&mut current));
            }
            current.title = Some(title);
        } else if let Some(tune_type) = tag_value(line, "R:") {
            current.tune_type = Some(tune_type);
        } else if let Some(meter) = tag_value(line, "M:") {
            current.meter = Some(meter);
        } else if let Some(key) = tag_value(line, "K:") {
            current.key = Some(key);
        }
    }

    // The final tune has no following `T:` to close it.
    if !current.is_empty() {
        tunes.push(current);
    }

    tunes
}

fn tag_value(line: &str, tag: &str) -> Option<String> {
    line.strip_prefix(tag).map(|rest| rest.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn parses_single_tune_fields() {
        let tunes = parse_abc_str("X:1\nT:Cooley's\nR:reel\nM:4/4\nL:1/8\nK:Edor\n|:EBBA B2 EB|");
        assert_eq!(
            tunes,
            vec![TuneRecord {
                title: some("Cooley's"),
                tune_type: some("reel"),
                meter: some("4/4"),
                key: some("Edor"),
            }]
        );
    }

    #[test]
    fn keeps_final_tune_without_trailing_blank_line() {
        let tunes = parse_abc_str("T:First\nK:G\n\nT:Second\nR:jig\nK:D");
        assert_eq!(tunes.len(), 2);
        assert_eq!(tunes[1].title, some("Second"));
        assert_eq!(tunes[1].key, some("D"));
    }

    #[test]
    fn title_starts_new_tune_even_without_blank_separator() {
        let tunes = parse_abc_str("T:One\nK:A\nT:Two\nK:Bm\n");
        let titles: Vec<_> = tunes.iter().map(|t| t.title.clone()).collect();
        assert_eq!(titles, vec![some("One"), some("Two")]);
        assert_eq!(tunes[0].key, some("A"));
    }

    #[test]
    fn later_tag_overwrites_earlier_one() {
        let tunes = parse_abc_str("T:Modulating\nK:G\nK:D\n");
        assert_eq!(tunes[0].key, some("D"));
    }

    #[test]
    fn trims_lines_and_values() {
        let tunes = parse_abc_str("   T:   The Butterfly  \r\n\tR: slip jig\r\n");
        assert_eq!(tunes[0].title, some("The Butterfly"));
        assert_eq!(tunes[0].tune_type, some("slip jig"));
    }

    #[test]
    fn headers_before_first_title_form_untitled_record() {
        let tunes = parse_abc_str("M:6/8\n\nT:Lilting\nR:jig\n");
        assert_eq!(tunes.len(), 2);
        assert_eq!(tunes[0].title, None);
        assert_eq!(tunes[0].meter, some("6/8"));
        assert_eq!(tunes[1].title, some("Lilting"));
        assert_eq!(tunes[1].meter, None);
    }

    #[test]
    fn ignores_note_length_and_unknown_lines() {
        assert!(parse_abc_str("L:1/8\n% comment\n|:abc|\n\n\n").is_empty());
        assert!(parse_abc_str("").is_empty());
    }

    #[test]
    fn every_record_has_a_field() {
        let input = "garbage\nT:A\n\n\nnothing\nK:C\nT:B\nR:polka\n\n";
        for tune in parse_abc_str(input) {
            assert!(!tune.is_empty());
        }
    }

    #[test]
    fn carriage_return_only_line_endings() {
        let tunes = parse_abc_str("X:1\rT:Cooley's\rR:reel\rM:4/4\rK:Edor\r");
        assert_eq!(
            tunes,
            vec![TuneRecord {
                title: some("Cooley's"),
                tune_type: some("reel"),
                meter: some("4/4"),
                key: some("Edor"),
            }]
        );
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!(parse_abc_str("t:lower\nk:g\n").is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = parse_abc_file(Path::new("definitely/not/here.abc")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// A line that is a tag, a skipped header, or free text.
        fn any_line() -> impl Strategy<Value = String> {
            prop_oneof![
                ("[TRMKLX]", "[ A-Za-z0-9/']{0,10}").prop_map(|(tag, value)| format!("{tag}:{value}")),
                "[^\r\n]{0,16}",
                Just(String::new()),
            ]
        }

        /// Body text that can never be read as a tag line.
        fn noise_line() -> impl Strategy<Value = String> {
            "[%|a-z0-9 ]{0,12}"
        }

        fn field_value() -> impl Strategy<Value = String> {
            "[A-Za-z][A-Za-z0-9' ]{0,8}[A-Za-z0-9]"
        }

        proptest! {
            #[test]
            fn no_record_is_empty(text in any::<String>()) {
                for tune in parse_abc_str(&text) {
                    prop_assert!(!tune.is_empty());
                }
            }

            #[test]
            fn no_record_is_empty_for_tag_heavy_text(
                lines in prop::collection::vec(any_line(), 0..40),
                separator in prop_oneof![Just("\n"), Just("\r\n"), Just("\r")],
            ) {
                for tune in parse_abc_str(&lines.join(separator)) {
                    prop_assert!(!tune.is_empty());
                }
            }

            #[test]
            fn last_key_in_a_tune_wins(
                title in field_value(),
                first in field_value(),
                second in field_value(),
                noise in prop::collection::vec(noise_line(), 0..5),
            ) {
                let text = format!("T:{title}\nK:{first}\n{}\nK:{second}", noise.join("\n"));
                let tunes = parse_abc_str(&text);
                prop_assert_eq!(tunes.len(), 1);
                prop_assert_eq!(tunes[0].key.as_deref(), Some(second.as_str()));
            }

            #[test]
            fn final_tune_is_always_kept(
                tunes in prop::collection::vec((field_value(), field_value()), 1..6),
                blank_between in any::<bool>(),
            ) {
                let joiner = if blank_between { "\n\n" } else { "\n" };
                let text = tunes
                    .iter()
                    .map(|(title, key)| format!("T:{title}\nK:{key}"))
                    .collect::<Vec<_>>()
                    .join(joiner);

                let parsed = parse_abc_str(&text);
                prop_assert_eq!(parsed.len(), tunes.len());
                for (record, (title, key)) in parsed.iter().zip(&tunes) {
                    prop_assert_eq!(record.title.as_deref(), Some(title.as_str()));
                    prop_assert_eq!(record.key.as_deref(), Some(key.as_str()));
                }
            }
        }
    }
}
