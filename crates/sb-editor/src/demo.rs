//! Built-in scene shown on first run, before anything has been saved.

use sb_core::{Element, ElementId, ElementKind, Scene};

fn named(id: &str, name: &str, rotation: f64, kind: ElementKind) -> Element {
    Element {
        id: ElementId::intern(id),
        rotation,
        name: Some(name.to_string()),
        kind,
    }
}

fn text(id: &str, x: f64, y: f64, content: &str) -> Element {
    named(
        id,
        "Text",
        0.0,
        ElementKind::Text {
            x,
            y,
            text: content.to_string(),
            font_size: 24.0,
            fill: "#111827".to_string(),
        },
    )
}

fn ring(id: &str, cx: f64, cy: f64, inner: f64, outer: f64, fill: &str) -> Element {
    named(
        id,
        "Ring",
        0.0,
        ElementKind::Ring {
            cx,
            cy,
            inner_radius: inner,
            outer_radius: outer,
            fill: fill.to_string(),
        },
    )
}

fn dot(id: &str, cx: f64, cy: f64, radius: f64) -> Element {
    named(
        id,
        "Circle",
        0.0,
        ElementKind::Circle {
            cx,
            cy,
            radius,
            fill: "#696969".to_string(),
        },
    )
}

/// Wallpaper mock-up: a framed image, a caption card, and a small
/// ring-and-dots figure. Nothing is selected.
pub fn demo_scene() -> Scene {
    Scene::new(vec![
        named(
            "img-1",
            "Image 01",
            0.0,
            ElementKind::Image {
                x: 578.2502751914502,
                y: 395.0,
                width: 323.0,
                height: 198.0,
                src: "/images/canvas-01.jpg".to_string(),
                corner_radius: Some(51.0),
            },
        ),
        named(
            "fVtOVWXcHv9OZQWh_0h2t",
            "Arrow",
            40.746017809651136,
            ElementKind::Arrow {
                x: 474.9597314886694,
                y: 228.30938106113484,
                points: [0.0, 0.0, 249.17171499585385, 0.0],
                stroke: "#090b10".to_string(),
                stroke_width: 4.0,
            },
        ),
        named(
            "uAK1cO5MnKEa_jpGzCAvf",
            "Rectangle",
            0.0,
            ElementKind::Rect {
                x: 177.9510159218683,
                y: 54.0,
                width: 320.0,
                height: 200.0,
                fill: "#87CEEB".to_string(),
                corner_radius: Some(64.0),
            },
        ),
        text("Zsi2XL4WOar2jFMBr20x5", 222.04650735508005, 101.0, "This is a Windows 11"),
        text("H7FDBtMB7FDujkmxVIN_J", 225.04568178072947, 129.0, "Wallpaper"),
        ring(
            "-0XbMBXH38G1MVdV4PvZG",
            157.12920051858413,
            417.89177928613515,
            68.0,
            75.0,
            "#FACC15",
        ),
        dot("KqZvRvloc0Krts0lNx5zE", 120.14467660702464, 402.0736772128781, 17.0),
        dot("LiDxWjJxtzlkq7gu7pzog", 181.02170209214208, 401.96803975935757, 15.0),
        ring(
            "o1vQxH1YjbGyz40XR_YAw",
            160.1637079435547,
            444.8951830267829,
            21.0,
            23.0,
            "#fb1313",
        ),
        named(
            "3-4DGC78GctPx_OvcvZui",
            "Rectangle",
            0.0,
            ElementKind::Rect {
                x: 114.0487088866813,
                y: 420.11748043523113,
                width: 89.0,
                height: 29.0,
                fill: "#ffffff".to_string(),
                corner_radius: None,
            },
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn demo_scene_is_valid() {
        let scene = demo_scene();
        assert_eq!(scene.len(), 10);
        assert_eq!(scene.selected_id, None);
        for el in &scene.elements {
            el.kind.validate().unwrap();
        }
        let ids: HashSet<_> = scene.elements.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), scene.len());
    }
}
