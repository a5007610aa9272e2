//! Exact SVG markup for small wheels

use scentwheel::prelude::*;

fn two_note_scene(selection: Option<&str>) -> Scene {
    let catalog = Catalog::from_parts(
        vec![
            Item::new("Lilac", "Lilac", Category::Spring),
            Item::new("Mimosa", "Mimosa", Category::Spring),
        ],
        vec![Relation::new("Lilac", "Mimosa", Category::Spring)],
    )
    .unwrap();
    let mut scene = Scene::build(&catalog, Category::Spring, Viewport::new(1000.0, 1000.0));
    scene.apply_selection(selection);
    scene
}

#[test]
fn test_bundled_path_through_branch() {
    let svg = SvgRenderer::new().render(&two_note_scene(None)).unwrap();
    // leaves at 90 and 270 degrees on r=380, branch node pulled to 0.85 of r=190
    let expected = concat!(
        r#"d="M380,0L316.667,26.917"#,
        "C253.333,53.833,126.667,107.667,0,107.667",
        "C-126.667,107.667,-253.333,53.833,-316.667,26.917",
        r#"L-380,0""#
    );
    assert!(svg.contains(expected), "{svg}");
}

#[test]
fn test_label_transforms() {
    let svg = SvgRenderer::new().render(&two_note_scene(None)).unwrap();
    assert!(svg.contains(
        r#"<text class="node active" transform="rotate(0)translate(400)" text-anchor="start" font-size="11px" style="cursor: pointer">Lilac</text>"#
    ));
    assert!(svg.contains(
        r#"<text class="node active" transform="rotate(180)translate(400)rotate(180)" text-anchor="end" font-size="11px" style="cursor: pointer">Mimosa</text>"#
    ));
}

#[test]
fn test_selection_marks_link_active() {
    let plain = SvgRenderer::new().render(&two_note_scene(None)).unwrap();
    let selected = SvgRenderer::new()
        .render(&two_note_scene(Some("Mimosa")))
        .unwrap();
    assert!(plain.contains(r#"<path class="link" "#));
    assert!(selected.contains(r#"<path class="link active" "#));
    // only the class attribute differs
    assert_eq!(plain, selected.replace("link active", "link"));
}

#[test]
fn test_group_structure() {
    let svg = SvgRenderer::new().render(&two_note_scene(None)).unwrap();
    let links = svg.find(r#"<g class="links">"#).unwrap();
    let nodes = svg.find(r#"<g class="nodes">"#).unwrap();
    assert!(links < nodes);
    assert!(svg.find("<path").unwrap() < nodes);
    assert!(svg.find("<text").unwrap() > nodes);
    assert_eq!(svg.matches("<g").count(), 3);
    assert_eq!(svg.matches("</g>").count(), 3);
}

#[test]
fn test_escapes_label_text() {
    let catalog = Catalog::from_parts(
        vec![Item::new("Fig & <Tonka>", "Fig", Category::Autumn)],
        vec![],
    )
    .unwrap();
    let scene = Scene::build(&catalog, Category::Autumn, Viewport::new(800.0, 800.0));
    let svg = SvgRenderer::new().render(&scene).unwrap();
    assert!(svg.contains(">Fig &amp; &lt;Tonka&gt;</text>"));
}
