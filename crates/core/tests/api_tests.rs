//! Library API integration tests
use rstest::rstest;
use wikifold_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).expect("fixture should exist")
}

#[test]
fn test_section_article_api() {
    let html = read_fixture("article.html");
    let article = section_article(&html).expect("should section");

    assert!(article.infobox_html.contains("Pronunciation"));
    assert!(article.intro_html.contains("most widely consumed"));
    assert_eq!(article.sections.len(), 2);
    assert_eq!(article.sections[0].heading, "History");
    assert_eq!(article.sections[1].heading, "Pharmacology");
}

#[test]
fn test_infobox_image_from_fixture() {
    let html = read_fixture("article.html");
    let article = section_article(&html).expect("should section");

    let image = article.infobox_image.expect("fixture infobox has an image");
    assert!(image.src.starts_with("https://upload.wikimedia.org/"));
    assert_eq!(image.alt, "Structural formula of caffeine");
    assert_eq!(image.width, 220);
    assert_eq!(image.height, 164);

    assert!(!article.infobox_html.contains("<img"), "lead image row should be removed");
}

#[test]
fn test_page_meta_from_fixture() {
    let html = read_fixture("article.html");
    let article = section_article(&html).expect("should section");

    assert_eq!(article.meta.title.as_deref(), Some("Caffeine"));
    assert_eq!(article.meta.language.as_deref(), Some("en"));
    assert_eq!(article.meta.canonical_url.as_deref(), Some("https://en.wikipedia.org/wiki/Caffeine"));
}

#[test]
fn test_empty_trailing_section_dropped() {
    let html = read_fixture("article.html");
    let article = section_article(&html).expect("should section");

    // The fixture's "See also" heading has no content under it.
    assert!(article.sections.iter().all(|s| s.heading != "See also"));
}

#[test]
fn test_nested_subheading_stays_inline() {
    let html = read_fixture("article.html");
    let article = section_article(&html).expect("should section");

    let history = &article.sections[0];
    assert!(history.html.contains("Etymology"));
    assert!(history.html.contains("caféine"));
}

#[test]
fn test_no_heading_leakage() {
    let html = read_fixture("article.html");
    let article = section_article(&html).expect("should section");

    for section in &article.sections {
        assert!(!section.html.contains("<h2"), "heading leaked into {}", section.id);
    }
}

#[test]
fn test_completeness_no_content_loss() {
    let html = read_fixture("article.html");
    let article = section_article(&html).expect("should section");

    let combined = format!("{}{}", article.infobox_html, article.to_html());
    for phrase in [
        "N06BC01",
        "unregulated",
        "15th century",
        "caféine",
        "CYP1A2",
        "three to seven hours",
    ] {
        assert!(combined.contains(phrase), "lost content: {}", phrase);
    }
}

#[test]
fn test_idempotent_output() {
    let html = read_fixture("article.html");

    let first = section_article(&html).expect("should section");
    let second = section_article(&html).expect("should section");

    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_stub_article() {
    let html = read_fixture("stub.html");
    let article = section_article(&html).expect("should section");

    assert_eq!(article.infobox_html, "");
    assert!(article.infobox_image.is_none());
    assert!(article.intro_html.contains("Mokelumne Peak"));
    assert!(article.sections.is_empty());

    let slots = article.slots();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].id, INTRO_SECTION_ID);
}

#[test]
fn test_malformed_fixture_degrades() {
    let html = read_fixture("malformed.html");
    let article = section_article(&html).expect("malformed input must not error");

    let text = article.to_text();
    assert!(text.contains("mangled in transit"));
}

#[test]
fn test_scenario_infobox_and_two_sections() {
    let html = concat!(
        r#"<body><table class="infobox"><tr><td><img src="//x/y.png" width="100" height="50"></td></tr></table>"#,
        r#"<p>Intro text</p>"#,
        r#"<section><h2>History</h2><p>History text</p></section>"#,
        r#"<section><h2>Legacy</h2><p>Legacy text</p></section></body>"#,
    );

    let article = section_article(html).expect("should section");

    let image = article.infobox_image.expect("image should be extracted");
    assert_eq!(image.src, "https://x/y.png");
    assert_eq!(image.width, 100);
    assert_eq!(image.height, 50);

    assert!(article.intro_html.contains("Intro text"));
    assert_eq!(article.sections.len(), 2);
    assert_eq!(article.sections[0].heading, "History");
    assert_eq!(article.sections[1].heading, "Legacy");
}

#[test]
fn test_scenario_stub_without_infobox() {
    let article = section_article("<body><p>Just a stub article.</p></body>").expect("should section");

    assert_eq!(article.infobox_html, "");
    assert!(article.infobox_image.is_none());
    assert!(article.intro_html.contains("Just a stub article."));
    assert!(article.sections.is_empty());
}

#[rstest]
#[case("//upload.wikimedia.org/pic.png", "https://upload.wikimedia.org/pic.png")]
#[case("/static/images/pic.png", "https://en.wikipedia.org/static/images/pic.png")]
#[case("thumb/pic.png", "https://en.wikipedia.org/thumb/pic.png")]
#[case("http://upload.wikimedia.org/pic.png", "https://upload.wikimedia.org/pic.png")]
fn test_image_src_normalization(#[case] src: &str, #[case] expected: &str) {
    let html = format!(r#"<body><div class="infobox"><img src="{}"></div></body>"#, src);
    let extract = extract_infobox(&html);

    assert_eq!(extract.infobox_image.expect("image should resolve").src, expected);
}

#[test]
fn test_graceful_degradation_inputs() {
    for html in ["   ", "<div><p>unclosed", "<body></body>", "<<<>>>", "plain text, no markup"] {
        let article = section_article(html).expect("must never error on non-empty input");
        assert!(!article.slots().is_empty());
    }
}

#[test]
fn test_empty_input_errors() {
    assert!(matches!(section_article(""), Err(WikifoldError::InvalidInput)));
}

#[test]
fn test_output_formats() {
    let html = read_fixture("article.html");
    let article = section_article(&html).expect("should section");

    let json = article.to_format(OutputFormat::Json).unwrap();
    assert!(json.contains("\"sections\""));

    let text = article.to_format(OutputFormat::Text).unwrap();
    assert!(text.contains("History"));
    assert!(!text.contains("<p"));

    let rendered = article.to_format(OutputFormat::Html).unwrap();
    assert!(rendered.contains("<p"));
}

#[test]
fn test_standalone_intro_split() {
    let html = read_fixture("article.html");
    let infobox_free = extract_infobox(&html).remaining;
    let split = extract_intro(&infobox_free);

    assert!(split.intro_html.contains("most widely consumed"));
    assert!(split.remaining.contains("History"));

    let sections = split_into_sections(&split.remaining);
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].id, "section-0");
    assert_eq!(sections[1].id, "section-1");
}
