use super::*;

fn para(run: TextRun) -> String {
    conv(&doc(vec![Node::paragraph(vec![Node::Text(run)])]))
}

#[test]
fn test_bold_prefix() {
    let run = TextRun::plain("Hello world")
        .with_span(0, TextAttributes::bold())
        .with_span(6, TextAttributes::default());

    insta::assert_snapshot!(para(run), @"<p><strong>Hello </strong>world</p>");
}

#[test]
fn test_reference_marker() {
    let run = TextRun::plain("See note[3]")
        .with_span(0, TextAttributes::default())
        .with_span(8, TextAttributes::default());

    insta::assert_snapshot!(para(run), @"<p>See note<sup>[3]</sup></p>");
}

#[test]
fn test_italic_link() {
    let run = TextRun::plain("Read the docs now")
        .with_span(0, TextAttributes::default())
        .with_span(
            5,
            TextAttributes {
                italic: true,
                link_url: Some("https://docs.example/".into()),
                ..TextAttributes::default()
            },
        )
        .with_span(13, TextAttributes::default());
    let html = para(run);

    insta::assert_snapshot!(html, @r###"<p>Read <em><a href="https://docs.example/">the docs</a></em> now</p>"###);
    assert_balanced(&html);
}

#[test]
fn test_every_attribute_is_balanced() {
    let all = TextAttributes {
        bold: true,
        italic: true,
        underline: true,
        link_url: Some("/x".into()),
    };
    let run = TextRun::plain("abc")
        .with_span(0, all.clone())
        .with_span(1, TextAttributes::bold())
        .with_span(2, all);
    let html = para(run);

    insta::assert_snapshot!(html, @r###"<p><em><strong><a href="/x">a</a></strong></em><strong>b</strong><em><strong><a href="/x">c</a></strong></em></p>"###);
    assert_balanced(&html);
}

#[test]
fn test_uniform_runs() {
    let bold = TextRun::plain("Warning").with_span(0, TextAttributes::bold());
    insta::assert_snapshot!(para(bold), @"<p><strong>Warning</strong></p>");

    let italic = TextRun::plain("To be or not").with_span(0, TextAttributes::italic());
    insta::assert_snapshot!(para(italic), @"<p><blockquote>To be or not</blockquote></p>");

    let url = TextRun::plain("https://example.com");
    insta::assert_snapshot!(para(url), @r###"<p><a href="https://example.com">https://example.com</a></p>"###);
}

#[test]
fn test_span_autolink() {
    let run = TextRun::plain("Visit https://example.com")
        .with_span(0, TextAttributes::default())
        .with_span(6, TextAttributes::default());

    insta::assert_snapshot!(para(run), @r###"<p>Visit <a href="https://example.com">https://example.com</a></p>"###);
}

#[test]
fn test_entities_are_cleaned() {
    let run = TextRun::plain("Fish & chips \u{2014} \u{201c}tasty\u{201d}");
    insta::assert_snapshot!(para(run), @r###"<p>Fish &amp; chips &mdash; "tasty"</p>"###);
}

#[test]
fn test_blank_bold_is_removed() {
    let run = TextRun::plain("a b")
        .with_span(0, TextAttributes::default())
        .with_span(1, TextAttributes::bold())
        .with_span(2, TextAttributes::default());

    insta::assert_snapshot!(para(run), @"<p>ab</p>");
}

#[test]
fn test_malformed_runs_fail() {
    let run = TextRun::plain("short").with_span(9, TextAttributes::bold());
    let err = Converter::new()
        .convert(&doc(vec![Node::paragraph(vec![Node::Text(run)])]))
        .unwrap_err();

    assert!(
        matches!(err.kind(), ErrorKind::MalformedAttributeRuns { .. }),
        "{err}"
    );
}
