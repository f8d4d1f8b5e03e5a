use insta::assert_snapshot;

use crate::{CodeBlockProcessor, ProcessorOptions, process_comment};

fn parse(text: &str) -> (bool, String) {
    let mut processor = CodeBlockProcessor::new(text, ProcessorOptions::default());
    let found = processor.parse_code_blocks();
    (found, processor.into_text())
}

#[test]
fn empty_input_is_returned_unchanged() {
    assert_eq!(parse(""), (false, String::new()));
}

#[test]
fn delimiter_free_text_is_returned_unchanged() {
    let text = "no markup in here, just plain prose with <b>other</b> tags.";
    // <b> is not a recognized delimiter.
    assert_eq!(parse(text), (false, text.to_owned()));
}

#[test]
fn one_well_formed_tag_pair() {
    let (found, out) = parse("before <code>let x = 1;</code> after");
    assert!(found);
    assert_eq!(out, "before <code>let x = 1;</code> after");
}

#[test]
fn surrounding_text_is_untouched_byte_for_byte() {
    let (_, out) = parse("héllo `café` ok");
    assert_eq!(out, "héllo <code>café</code> ok");
}

#[test]
fn backtick_pairs_produce_separate_blocks() {
    let (found, out) = parse("`a` some text `b`");
    assert!(found);
    assert_eq!(out, "<code>a</code> some text <code>b</code>");
}

#[test]
fn adjacent_backticks_form_an_empty_block() {
    assert_eq!(parse("x``y").1, "x<code></code>y");
}

#[test]
fn script_body_is_escaped_not_executable() {
    let (_, out) = parse("<code><script>alert(1)</script></code>");
    assert_eq!(out, "<code>&lt;script&gt;alert(1)&lt;/script&gt;</code>");
}

#[test]
fn marker_inside_tag_block_stays_literal() {
    let (_, out) = parse("<code>a `b` c</code>");
    assert_eq!(out, "<code>a `b` c</code>");
}

#[test]
fn nested_open_tags_keep_the_outermost_anchor() {
    let (_, out) = parse("<code>x<code>y</code>z</code>");
    assert_eq!(out, "<code>x&lt;code&gt;y&lt;/code&gt;z</code>");
}

#[test]
fn sequential_blocks_survive_offset_shifts() {
    let (_, out) = parse("a `one` b <code>two</code> c `three` d");
    assert_eq!(
        out,
        "a <code>one</code> b <code>two</code> c <code>three</code> d"
    );
}

#[test]
fn formatted_output_without_raw_delimiters_is_not_reprocessed() {
    let text = "a &lt;code&gt;b&lt;/code&gt; c";
    assert_eq!(parse(text), (false, text.to_owned()));
}

#[test]
fn reprocessing_plain_bodies_is_stable() {
    let once = process_comment("`a`", ProcessorOptions::default());
    let twice = process_comment(&once, ProcessorOptions::default());
    assert_eq!(once, twice);
}

#[test]
fn mixed_document_snapshot() {
    let (_, out) = parse("intro `a&b` mid <code> x < y </code> end");
    assert_snapshot!(out, @"intro <code>a&amp;b</code> mid <code>x &lt; y</code> end");
}
