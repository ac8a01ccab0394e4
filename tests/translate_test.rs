mod common;

use common::meaningful;
use url::Url;
use webpage_binder::blocks::translate;
use webpage_binder::fetch::MemoryFetcher;
use webpage_binder::style::normalize;
use webpage_binder::{dom, Diagnostics, DocumentBlock, Options, Warning};

fn base() -> Url {
    Url::parse("https://site.test/").unwrap_or_else(|e| panic!("{e}"))
}

fn image(bytes: &[u8]) -> DocumentBlock {
    DocumentBlock::Image {
        bytes: bytes.to_vec(),
        width_inches: 4.0,
    }
}

#[test]
fn blocks_follow_document_order_across_nesting() {
    let html = r#"<html><body>
        <div>
          <h2>A</h2>
          <section>
            <p>B</p>
            <div><div><img src="/one.png"></div></div>
          </section>
        </div>
        <h3>C</h3>
        <ul><li><p>D</p></li></ul>
        <img src="https://cdn.test/two.png">
        <h1>E</h1>
    </body></html>"#;
    let fetcher = MemoryFetcher::new()
        .with("https://site.test/one.png", "ONE")
        .with("https://cdn.test/two.png", "TWO");
    let mut diagnostics = Diagnostics::new();

    let blocks = translate(html, &base(), &fetcher, &Options::default(), &mut diagnostics);

    assert_eq!(
        meaningful(&blocks),
        vec![
            DocumentBlock::heading(2, "A"),
            DocumentBlock::paragraph("B"),
            image(b"ONE"),
            DocumentBlock::heading(3, "C"),
            DocumentBlock::paragraph("D"),
            image(b"TWO"),
            DocumentBlock::heading(1, "E"),
        ]
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn images_nested_in_paragraphs_and_headings_are_embedded() {
    let html = r#"<body>
        <p><img src="/a.png"></p>
        <p>Caption <a href="/x"><img src="/b.png"></a></p>
        <h2><img src="/c.png">Logo</h2>
    </body>"#;
    let fetcher = MemoryFetcher::new()
        .with("https://site.test/a.png", "A")
        .with("https://site.test/b.png", "B")
        .with("https://site.test/c.png", "C");
    let mut diagnostics = Diagnostics::new();

    let blocks = translate(html, &base(), &fetcher, &Options::default(), &mut diagnostics);

    assert_eq!(
        meaningful(&blocks),
        vec![
            image(b"A"),
            DocumentBlock::paragraph("Caption "),
            image(b"B"),
            DocumentBlock::heading(2, "Logo"),
            image(b"C"),
        ]
    );
    assert_eq!(blocks.iter().filter(|b| b.is_image()).count(), 3);
    assert!(diagnostics.is_empty());
}

#[test]
fn failed_image_drops_one_block_and_walk_continues() {
    let html = r#"<body>
        <img src="/a.png">
        <img src="/broken.png">
        <p>after broken</p>
        <img src="/c.png">
    </body>"#;
    let fetcher = MemoryFetcher::new()
        .with("https://site.test/a.png", "A")
        .with_status("https://site.test/broken.png", 403)
        .with("https://site.test/c.png", "C");
    let mut diagnostics = Diagnostics::new();

    let blocks = translate(html, &base(), &fetcher, &Options::default(), &mut diagnostics);

    assert_eq!(
        meaningful(&blocks),
        vec![image(b"A"), DocumentBlock::paragraph("after broken"), image(b"C")]
    );
    assert_eq!(blocks.iter().filter(|b| b.is_image()).count(), 2);
    assert!(matches!(
        diagnostics.warnings(),
        [Warning::Image { url, .. }] if url == "https://site.test/broken.png"
    ));
}

#[test]
fn whitespace_text_kept_by_default() {
    let html = "<body><div>\n  <p>x</p>\n</div></body>";
    let mut diagnostics = Diagnostics::new();

    let blocks = translate(html, &base(), &MemoryFetcher::new(), &Options::default(), &mut diagnostics);

    assert_eq!(
        blocks,
        vec![
            DocumentBlock::paragraph("\n  "),
            DocumentBlock::paragraph("x"),
            DocumentBlock::paragraph("\n"),
        ]
    );
}

#[test]
fn whitespace_text_dropped_on_request() {
    let html = "<body><div>\n  <p>x</p>\n  loose text\n</div></body>";
    let options = Options {
        keep_blank_text: false,
        ..Options::default()
    };
    let mut diagnostics = Diagnostics::new();

    let blocks = translate(html, &base(), &MemoryFetcher::new(), &options, &mut diagnostics);

    assert_eq!(
        blocks,
        vec![
            DocumentBlock::paragraph("x"),
            DocumentBlock::paragraph("\n  loose text\n"),
        ]
    );
}

#[test]
fn styled_page_translates_without_css_text() {
    let styled = normalize("<main><h1>Title</h1><p>Body text</p></main>", &Options::default());
    let mut diagnostics = Diagnostics::new();

    let blocks = translate(&styled, &base(), &MemoryFetcher::new(), &Options::default(), &mut diagnostics);

    assert_eq!(
        blocks,
        vec![
            DocumentBlock::heading(1, "Title"),
            DocumentBlock::paragraph("Body text"),
        ]
    );
}

#[test]
fn normalizing_twice_keeps_all_content() {
    let fragments = [
        "<main><h1>T</h1><p>B</p><img src=\"/x.png\"></main>",
        "<html><head><title>Kept</title></head><body><article><p>A</p></article></body></html>",
        "plain text only",
        "",
    ];

    for fragment in fragments {
        let once = normalize(fragment, &Options::default());
        let twice = normalize(&once, &Options::default());
        let once_doc = dom::parse(&once);
        let twice_doc = dom::parse(&twice);

        assert_eq!(
            dom::text_content(&once_doc.select("body")),
            dom::text_content(&twice_doc.select("body")),
            "body text changed for {fragment:?}"
        );
        assert_eq!(
            once_doc.select("body *").length(),
            twice_doc.select("body *").length()
        );
        assert_eq!(twice_doc.select("html > head > style").length(), 2);
    }
}

#[test]
fn block_json_is_the_writer_hand_off() {
    let blocks = vec![
        DocumentBlock::heading(1, "T"),
        DocumentBlock::paragraph("P"),
        image(b"GIF89a"),
    ];

    let json = serde_json::to_value(&blocks).unwrap_or_default();

    assert_eq!(
        json,
        serde_json::json!([
            {"type": "heading", "level": 1, "text": "T"},
            {"type": "paragraph", "text": "P"},
            {"type": "image", "bytes": "R0lGODlh", "width_inches": 4.0},
        ])
    );
}
