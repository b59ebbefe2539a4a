//! Integration tests for the component matchers.

use serde_json::{json, Value};
use std::sync::Arc;
use html2carbon::components::{
    ComponentRegistry, HtmlConfig, HtmlMatcher, Matcher, MinimumHeading, ParagraphConfig,
    ParagraphMatcher,
};
use html2carbon::dom::{parse_document, Element};
use html2carbon::id::IdSource;
use html2carbon::model::{Component, Html};
use html2carbon::{Converter, SequentialIds};

fn converter_with(paragraphs: ParagraphConfig) -> Converter {
    let mut converter = Converter::new().with_ids(Arc::new(SequentialIds::new()));
    converter.add_component("paragraph", Arc::new(ParagraphMatcher::with_config(paragraphs)));
    converter
}

fn components(converter: &Converter, html: &str) -> Vec<Value> {
    let value: Value = serde_json::from_str(&converter.convert(html).unwrap()).unwrap();
    value["sections"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|s| s["components"].as_array().unwrap().clone())
        .flat_map(|l| l["components"].as_array().unwrap().clone())
        .collect()
}

fn paragraph_types(minimum: MinimumHeading) -> Vec<String> {
    let converter = converter_with(ParagraphConfig::new().with_minimum_heading(minimum));
    components(
        &converter,
        "<h1>1</h1><h2>2</h2><h3>3</h3><h4>4</h4><h5>5</h5><h6>6</h6><code>c</code><blockquote>q</blockquote><pre>p</pre>",
    )
    .iter()
    .map(|c| c["paragraphType"].as_str().unwrap().to_string())
    .collect()
}

#[test]
fn test_heading_clamp_table() {
    assert_eq!(
        paragraph_types(MinimumHeading::H1),
        vec!["h1", "h1", "h1", "h1", "h1", "h1", "blockquote", "blockquote", "pre"]
    );
    assert_eq!(
        paragraph_types(MinimumHeading::H2),
        vec!["h1", "h2", "h2", "h2", "h2", "h2", "blockquote", "blockquote", "pre"]
    );
    assert_eq!(
        paragraph_types(MinimumHeading::H3),
        vec!["h1", "h2", "h3", "h3", "h3", "h3", "blockquote", "blockquote", "pre"]
    );
}

#[test]
fn test_formatting_spans() {
    let converter = converter_with(ParagraphConfig::new());
    let components = components(
        &converter,
        "<p><b>Bold</b> then <i>italic</i>, <u>under</u> and <a href=\"/x\" title=\"t\">link</a></p>",
    );

    assert_eq!(components[0]["text"], "Bold then italic, under and link");
    assert_eq!(
        components[0]["formats"],
        json!([
            { "type": "strong", "from": 0, "to": 4 },
            { "type": "em", "from": 10, "to": 16 },
            { "type": "u", "from": 18, "to": 23 },
            { "type": "a", "from": 28, "to": 32, "attrs": { "href": "/x" } }
        ])
    );
}

#[test]
fn test_duplicate_span_text_uses_first_occurrence() {
    let converter = converter_with(ParagraphConfig::new());
    let components = components(&converter, "<p>go <em>go</em> go <strong>go</strong></p>");

    let formats = components[0]["formats"].as_array().unwrap();
    assert_eq!(formats[0]["from"], 0);
    assert_eq!(formats[1]["from"], 0);
}

#[test]
fn test_custom_formatting_tags() {
    let config = ParagraphConfig::new()
        .with_formatting_tag("mark", "highlight")
        .without_formatting_tag("em");
    let converter = converter_with(config);
    let components = components(&converter, "<p><mark>hot</mark> and <em>plain</em></p>");

    assert_eq!(
        components[0]["formats"],
        json!([{ "type": "highlight", "from": 0, "to": 3 }])
    );
}

#[test]
fn test_list_conversion() {
    let converter = converter_with(ParagraphConfig::new());
    let components = components(&converter, "<ul><li>A</li><li>B</li></ul>");

    assert_eq!(components.len(), 1);
    let list = &components[0];
    assert_eq!(list["component"], "List");
    assert_eq!(list["tagName"], "ul");

    let items = list["components"].as_array().unwrap();
    let texts: Vec<&str> = items.iter().map(|i| i["text"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["A", "B"]);
    assert!(items.iter().all(|i| i["paragraphType"] == "li"));
}

#[test]
fn test_custom_layout_type() {
    let config = ParagraphConfig::new().with_layout_type(|element: &Element<'_>| {
        format!("layout-{}", element.tag_name())
    });
    let converter = converter_with(config);
    let value: Value = serde_json::from_str(&converter.convert("<h2>t</h2><p>x</p>").unwrap()).unwrap();

    // The first element of a layout decides its type.
    assert_eq!(value["sections"][0]["components"][0]["type"], "layout-h2");
}

#[test]
fn test_raw_html_is_decoded() {
    let converter = converter_with(ParagraphConfig::new());
    let components = components(
        &converter,
        "<div data-special=\"html\">&lt;iframe src=&quot;https://example.com&quot;&gt;&lt;/iframe&gt;</div>",
    );

    assert_eq!(components[0]["component"], "HTML");
    assert_eq!(
        components[0]["html"],
        "<iframe src=\"https://example.com\"></iframe>"
    );
}

#[test]
fn test_raw_html_named_entities() {
    let converter = converter_with(ParagraphConfig::new());
    let components = components(
        &converter,
        "<div data-special=\"html\">&amp;lt;p&amp;gt;Caf&amp;eacute; &amp;mdash; &amp;rsquo;&amp;lt;/p&amp;gt;</div>",
    );

    assert_eq!(components[0]["html"], "<p>Café — ’</p>");
}

#[test]
fn test_raw_html_layout_type() {
    let mut converter = converter_with(ParagraphConfig::new());
    converter.add_component(
        "html",
        Arc::new(HtmlMatcher::with_config(
            HtmlConfig::new().with_layout_type(|_: &Element<'_>| "layout-wide".to_string()),
        )),
    );
    let value: Value =
        serde_json::from_str(&converter.convert("<div data-special=\"html\">x</div>").unwrap())
            .unwrap();
    assert_eq!(value["sections"][0]["components"][0]["type"], "layout-wide");
}

#[test]
fn test_matching_is_deterministic() {
    let parsed = parse_document("<p>Hello <strong>there</strong></p>");
    let p = parsed.dom.find_first(parsed.dom.root(), "p").unwrap();
    let element = parsed.dom.element(p);
    let registry = ComponentRegistry::with_defaults();

    let first = registry.find(element).unwrap().render(&SequentialIds::new());
    let second = registry.find(element).unwrap().render(&SequentialIds::new());
    assert_eq!(first, second);
}

/// Renders `<figure>` as raw HTML of its caption text.
struct FigureMatcher;

impl Matcher for FigureMatcher {
    fn kind(&self) -> &str {
        "Figure"
    }

    fn tags(&self) -> &[&str] {
        &["figure"]
    }

    fn requires_new_layout(&self, _element: &Element<'_>) -> bool {
        true
    }

    fn layout_type(&self, _element: &Element<'_>) -> String {
        "layout-figure".to_string()
    }

    fn render(&self, element: &Element<'_>, ids: &dyn IdSource) -> Component {
        Component::Html(Html {
            name: ids.next_id(),
            html: element.value(),
        })
    }
}

#[test]
fn test_custom_matcher() {
    let mut converter = converter_with(ParagraphConfig::new());
    converter.add_component("figure", Arc::new(FigureMatcher));

    let value: Value = serde_json::from_str(
        &converter
            .convert("<p>before</p><figure><img src=\"a.png\"><figcaption>Cap</figcaption></figure>")
            .unwrap(),
    )
    .unwrap();

    let layouts = value["sections"][0]["components"].as_array().unwrap();
    assert_eq!(layouts.len(), 2);
    assert_eq!(layouts[1]["type"], "layout-figure");
    assert_eq!(layouts[1]["components"][0]["html"], "Cap");
}
