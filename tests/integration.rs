//! Integration tests for tagsoup.
//!
//! These tests drive whole documents through the parser, the renderer and
//! the output helpers the binary uses, and check the exact lines produced.

use tagsoup_ansi::utils::{markup_width, strip_markup, stylize, visible};
use tagsoup_config::Config;
use tagsoup_core::LinkKind;
use tagsoup_parser::{MarkupEvent, TagSoupParser};
use tagsoup_render::{render, HtmlRenderer, ListFormatter, RegexHighlighter};

/// Helper to render a document at a width without base URL.
fn lines(source: &str, width: usize) -> Vec<String> {
    render(source, width, false, "").lines
}

// =============================================================================
// Parser Tests
// =============================================================================

#[test]
fn test_parser_event_stream() {
    let events: Vec<_> = TagSoupParser::new("<P Class=x>Hi &amp; bye</p>").collect();
    assert_eq!(events.len(), 3);
    match &events[0] {
        MarkupEvent::StartTag { name, attributes } => {
            assert_eq!(name, "p");
            assert_eq!(attributes.get("Class"), Ok("x"));
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(
        events[1],
        MarkupEvent::Text {
            content: "Hi & bye".to_string()
        }
    );
    assert_eq!(
        events[2],
        MarkupEvent::EndTag {
            name: "p".to_string()
        }
    );
}

#[test]
fn test_parser_doesnt_panic_on_garbage() {
    let events: Vec<_> = TagSoupParser::new("<<>><</ =\"'&;&#x;").collect();
    assert!(events.len() < 10);
}

// =============================================================================
// Rendering Scenarios
// =============================================================================

#[test]
fn test_heading_paragraph_and_link() {
    let rendered = render(
        "<h1>Title</h1><p>Hello <a href=\"/x\">world</a>.</p>",
        80,
        false,
        "http://e.com/",
    );
    assert_eq!(
        rendered.lines,
        vec![
            "Title",
            "-----",
            "",
            "Hello <u>world</>[1].",
            "",
            "Links: ",
            "[1]: http://e.com/x (link)",
        ]
    );
    assert_eq!(rendered.links.len(), 1);
    assert_eq!(rendered.links[0].url, "http://e.com/x");
}

#[test]
fn test_unordered_list() {
    assert_eq!(
        lines("<ul><li>a</li><li>b</li></ul>", 80),
        vec!["", "  * a", "  * b", ""]
    );
}

#[test]
fn test_ordered_lists_restart_numbering() {
    assert_eq!(
        lines("<ol><li>a</li></ol><ol><li>b</li></ol>", 80),
        vec!["", " 1.a", "", "", " 1.b", ""]
    );
}

#[test]
fn test_ordered_list_two_digit_marker() {
    let items: String = (0..10).map(|i| format!("<li>{}</li>", i)).collect();
    let rendered = lines(&format!("<ol>{}</ol>", items), 80);
    assert_eq!(rendered[1], " 1.0");
    assert_eq!(rendered[10], "10.9");
}

#[test]
fn test_list_item_text_wraps_under_marker() {
    assert_eq!(
        lines("<ul><li>alpha beta gamma</li></ul>", 16),
        vec!["", "  * alpha beta ", "    gamma", ""]
    );
}

#[test]
fn test_nested_blockquotes() {
    assert_eq!(
        lines("<blockquote><blockquote>deep</blockquote></blockquote>", 80),
        vec!["", "", "    deep", "", ""]
    );
}

#[test]
fn test_paragraphs_inside_blockquote() {
    assert_eq!(
        lines("<blockquote><p>a</p><p>b</p></blockquote>", 80),
        vec!["", "  a", "", "  b", ""]
    );
}

#[test]
fn test_heading_after_text_gets_separator() {
    assert_eq!(
        lines("text<h2>Sub</h2>more", 80),
        vec!["text", "", "Sub", "more"]
    );
}

#[test]
fn test_definition_list() {
    assert_eq!(
        lines("<dl><dt>rust</dt><dd>a language</dd></dl>", 80),
        vec!["rust", "", "        a language", ""]
    );
}

#[test]
fn test_preformatted_keeps_blank_lines() {
    assert_eq!(lines("<pre>x\n\n  y</pre>", 80), vec!["x", "", "  y"]);
}

#[test]
fn test_itunes_hack_persists_across_paragraphs() {
    assert_eq!(
        lines("<ituneshack>a\nb<p>c\nd</p>", 80),
        vec!["a", "b", "", "c", "d"]
    );
}

#[test]
fn test_horizontal_rule_matches_width() {
    let rendered = lines("above<hr>below", 12);
    assert_eq!(rendered, vec!["above", " ---------- ", "below"]);
    assert_eq!(markup_width(&rendered[1]), 12);
}

#[test]
fn test_tags_are_case_insensitive() {
    assert_eq!(lines("<P>Hi <B>there</B></P>", 80), vec!["Hi <b>there</>"]);
}

#[test]
fn test_unknown_tags_render_children() {
    assert_eq!(lines("<div><span>x</span> <table>y</table></div>", 80), vec!["xy"]);
}

#[test]
fn test_unterminated_tag_ends_document() {
    let rendered = render("<p>keep</p><img src='a.png' alt=\"x", 80, false, "");
    assert_eq!(rendered.lines, vec!["keep"]);
    assert!(rendered.links.is_empty());
}

#[test]
fn test_width_zero_is_clamped() {
    assert_eq!(lines("ab cd", 0), vec!["ab", "cd"]);
}

#[test]
fn test_wrapped_lines_stay_below_width() {
    let text = "one two three four five six seven eight nine ten eleven twelve";
    let rendered = lines(&format!("<p>{}</p>", text), 20);
    assert!(rendered.len() > 1);
    for line in &rendered {
        assert!(markup_width(line) < 20, "line too wide: {:?}", line);
    }
    assert_eq!(rendered.join(" ").split_whitespace().count(), 12);
}

// =============================================================================
// Links
// =============================================================================

#[test]
fn test_links_deduplicated_across_kinds() {
    let rendered = render(
        "<a href=\"http://x/\">x</a> and <img src=\"http://x/\">",
        80,
        false,
        "",
    );
    assert_eq!(rendered.lines[0], "<u>x</>[1] and [image: 1]");
    assert_eq!(rendered.links.len(), 1);
    assert_eq!(rendered.links[0].kind, LinkKind::Href);
    assert_eq!(rendered.lines.last().unwrap(), "[1]: http://x/ (link)");
}

#[test]
fn test_link_numbering_follows_first_occurrence() {
    let rendered = render(
        "<a href='/b'>b</a> <img src='/a'> <a href='/b'>again</a> <embed type='application/x-shockwave-flash' src='/c'>",
        80,
        true,
        "http://h/",
    );
    let urls: Vec<_> = rendered.links.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(urls, vec!["http://h/b", "http://h/a", "http://h/c"]);
    assert_eq!(rendered.links[2].kind, LinkKind::Embed);
    assert!(rendered.lines.contains(&"[3]: http://h/c (embedded flash)".to_string()));
}

#[test]
fn test_attribute_entities_decoded_before_resolving() {
    let rendered = render(
        "<a href=\"/q?a=1&amp;b=2\">q</a>",
        80,
        false,
        "http://e.com/",
    );
    assert_eq!(rendered.links[0].url, "http://e.com/q?a=1&b=2");
}

#[test]
fn test_credentials_are_censored() {
    let rendered = render("<a href=\"https://me:pw@e.com/\">x</a>", 80, false, "");
    assert_eq!(rendered.links[0].url, "https://*:*@e.com/");
}

#[test]
fn test_raw_differs_only_in_markers() {
    let source = "<p>Some <b>bold</b> and <u>under</u> and <a href='http://a/'>link</a>. \
                  More words to make the paragraph wrap at least once.</p>";
    let styled = render(source, 30, false, "").lines;
    let raw = render(source, 30, true, "").lines;

    assert_eq!(styled.len(), raw.len());
    for (styled, raw) in styled.iter().zip(&raw) {
        assert_eq!(&strip_markup(styled), raw);
    }
    assert!(raw[0].contains("bold"));
    assert!(!raw[0].contains("<b>"));
}

// =============================================================================
// Configuration and Output
// =============================================================================

#[test]
fn test_labels_from_config() {
    let config = Config::parse_override(
        r#"
        [labels]
        Image = "Bild"
        LinksHeader = "Verweise: "
        "#,
    )
    .unwrap();
    let renderer = HtmlRenderer::new(80).with_labels(config.labels);
    let rendered = renderer.render("<img src=\"http://e.com/p.png\">", "");
    assert_eq!(
        rendered.lines,
        vec!["[Bild: 1]", "", "Verweise: ", "[1]: http://e.com/p.png (Bild)"]
    );
}

#[test]
fn test_list_payload_with_configured_highlight() {
    let config = Config::parse_override(
        r#"
        [[highlight]]
        Location = "all"
        Pattern = "[0-9]+"
        Style = "num"
        "#,
    )
    .unwrap();
    let highlighter = RegexHighlighter::from_rules(&config.highlight).unwrap();

    let rendered = render("<p>It's 42 <b>now</b></p>", 80, false, "");
    let mut list = ListFormatter::new();
    list.add_lines(&rendered.lines, 0);
    assert_eq!(
        list.format_list(Some(&highlighter), "article"),
        "{list{listitem text:'It'\"'\"'s <num>42</> <b>now</>'}}"
    );
}

#[test]
fn test_stylized_output_is_visible_text() {
    let rendered = render("<p>1 &lt; 2 is <u>true</u></p>", 80, false, "");
    let line = &rendered.lines[0];
    assert_eq!(line, "1 <> 2 is <u>true</>");
    assert_eq!(visible(&stylize(line)), "1 < 2 is true");
    assert_eq!(strip_markup(line), "1 < 2 is true");
}
