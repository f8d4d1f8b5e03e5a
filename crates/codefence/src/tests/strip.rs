use crate::{CodeBlockProcessor, ProcessorOptions, process_comment};

fn strip(text: &str) -> String {
    let mut processor = CodeBlockProcessor::new(text, ProcessorOptions::default());
    processor.strip_pre_tags();
    processor.into_text()
}

#[test]
fn bare_pre_tags_are_stripped() {
    assert_eq!(strip("<pre>hello</pre>"), "hello");
}

#[test]
fn stripping_is_case_insensitive() {
    assert_eq!(strip("<PRE>hello</PRE>"), "hello");
}

#[test]
fn pre_wrapping_a_code_block_is_kept() {
    let text = "<pre><code>x</code></pre>";
    assert_eq!(strip(text), text);
}

#[test]
fn pre_with_attributes_wrapping_code_is_kept() {
    let text = "<pre class=\"lang\"><code>x</code></pre>";
    assert_eq!(strip(text), text);
}

#[test]
fn kept_and_stripped_tags_can_mix() {
    assert_eq!(
        strip("<pre>a</pre><pre><code>b</code></pre>"),
        "a<pre><code>b</code></pre>"
    );
}

#[test]
fn pre_prefixed_tag_names_also_match() {
    // Same behavior as the `<pre[^>]*>` pattern it mirrors.
    assert_eq!(strip("<previous>x"), "x");
}

#[test]
fn unprivileged_authors_lose_stray_pre_tags() {
    let out = process_comment("`a` <pre>plain</pre>", ProcessorOptions::default());
    assert_eq!(out, "<code>a</code> plain");
}

#[test]
fn privileged_authors_keep_their_pre_tags() {
    let options = ProcessorOptions {
        privileged: true,
        ..Default::default()
    };
    let out = process_comment("`a` <pre>plain</pre>", options);
    assert_eq!(out, "<code>a</code> <pre>plain</pre>");
}

#[test]
fn strip_only_runs_when_blocks_were_found() {
    // No delimiters at all, so the parse reports nothing and the stray
    // <pre> survives even for unprivileged authors.
    let text = "<pre>plain</pre>";
    assert_eq!(process_comment(text, ProcessorOptions::default()), text);
}

#[test]
fn generated_block_wrappers_survive_the_strip() {
    let body = "y".repeat(71);
    let out = process_comment(&format!("`{body}`"), ProcessorOptions::default());
    assert_eq!(out, format!("<pre><code>{body}</code></pre>"));
}
