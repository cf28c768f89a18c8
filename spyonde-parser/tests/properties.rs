//! Property-based tests for segmentation and conversion
//!
//! Scripts are generated from a small set of single-line templates, none of which leave
//! a string or bracket open, so every generated script tokenizes cleanly.

use proptest::prelude::*;
use spyonde_parser::spyonde::cells::segmenting::{scan, segment};
use spyonde_parser::spyonde::cells::Segment;
use spyonde_parser::spyonde::source::Source;
use spyonde_parser::spyonde::{ConversionContext, NotebookLoader};

fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Separators
        Just("#%%".to_string()),
        Just("# %%".to_string()),
        Just("# <codecell>".to_string()),
        "#%% [a-z]{1,8}",
        "# %% [A-Z][a-z ]{0,8}[a-z]",
        // Comments and prose
        Just("#".to_string()),
        "# [a-z]([a-z ]{0,10}[a-z])?",
        "# - [a-z]{1,8}",
        Just("# spyonde: ignore-cell".to_string()),
        // Code
        "[a-z]{1,6} = [0-9]{1,3}",
        "print\\([a-z]{1,5}\\)",
        Just("s = '#%% in a string'".to_string()),
        Just("    return x  # %% trailing".to_string()),
        // Blank
        Just(String::new()),
    ]
}

fn script_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(line_strategy(), 0..40)
}

fn join(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

fn segments_of(text: &str, context: &ConversionContext) -> Vec<Segment> {
    let scanned = scan(&Source::new(text), context).unwrap();
    segment(&scanned, context)
}

proptest! {
    #[test]
    fn segments_partition_the_file(lines in script_strategy()) {
        let context = ConversionContext::new("demo.py");
        let segments = segments_of(&join(&lines), &context);

        let mut next = 0;
        for seg in &segments {
            prop_assert_eq!(seg.span.start, next);
            prop_assert!(seg.span.end > seg.span.start);
            let body = if seg.synthetic {
                &seg.lines[1..]
            } else {
                &seg.lines[..]
            };
            prop_assert_eq!(body, &lines[seg.span.clone()]);
            next = seg.span.end;
        }
        prop_assert_eq!(next, lines.len());
    }

    #[test]
    fn resegmenting_a_cell_reproduces_it(lines in script_strategy()) {
        let context = ConversionContext::new("demo.py");
        for seg in segments_of(&join(&lines), &context) {
            if !context.markers.is_separator(&seg.lines[0]) || seg.span.start == 0 {
                continue;
            }
            let again = segments_of(&join(&seg.lines), &context);
            prop_assert_eq!(again.len(), 1);
            prop_assert_eq!(&again[0].lines, &seg.lines);
        }
    }

    #[test]
    fn conversion_is_deterministic(lines in script_strategy()) {
        let text = join(&lines);
        let first = NotebookLoader::from_string("demo.py", text.clone()).convert("3.7.4").unwrap();
        let second = NotebookLoader::from_string("demo.py", text).convert("3.7.4").unwrap();
        prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ignored_and_empty_cells_never_reach_the_notebook(lines in script_strategy()) {
        let document = NotebookLoader::from_string("demo.py", join(&lines)).convert("3.7.4").unwrap();
        for cell in &document.cells {
            prop_assert!(!cell.lines.is_empty());
            prop_assert!(cell.lines.iter().any(|line| !line.trim().is_empty()));
            prop_assert!(!cell.lines.iter().any(|line| line.contains("spyonde: ignore-cell")));
        }
    }
}
