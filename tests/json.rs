// Test serialization using json
#![cfg(feature = "serde")]

use glyph_icons::fonts::{FontResource, FontRole, FontSource};
use glyph_icons::icon::{GlyphSpec, Layer, Lift, Padding, Sizing};
use glyph_icons::presets::Preset;
use glyph_icons::raster::{Anchor, Embolden};
use image::Rgba;
use serde::{de::Deserialize, ser::Serialize};
use std::cmp::PartialEq;
use std::fmt::Debug;

fn test<X: Debug + PartialEq + Serialize + for<'a> Deserialize<'a>>(x: X, t: &str) {
    match serde_json::to_string(&x) {
        Ok(text) => assert_eq!(text, t),
        Err(err) => panic!("Ser of '{x:?}' failed: {err}"),
    }

    match serde_json::from_str::<X>(t) {
        Ok(v) => assert_eq!(v, x),
        Err(err) => panic!("Deser of '{t}' failed: {err}"),
    }
}

#[test]
fn font_source() {
    test(FontSource::path("a.ttf"), r#"{"path":{"path":"a.ttf","index":0}}"#);
    test(
        FontSource::family("Arial", 700),
        r#"{"family":{"name":"Arial","weight":700}}"#,
    );
    test(
        FontResource::from_candidates([FontSource::SansSerif { weight: 400 }]),
        r#"[{"sans_serif":{"weight":400}}]"#,
    );
    test(FontRole::Bold, r#""bold""#);
}

#[test]
fn default_weight() {
    let source: FontSource = serde_json::from_str(r#"{"family":{"name":"Arial"}}"#).unwrap();
    assert_eq!(source, FontSource::family("Arial", 400));
}

#[test]
fn anchor() {
    test(Anchor::MIDDLE, r#""mm""#);
    assert!(serde_json::from_str::<Anchor>(r#""zz""#).is_err());
}

#[test]
fn glyph() {
    test(Embolden::Synthesize(1), r#"{"synthesize":1}"#);
    test(Lift { divisor: 32, min: 1 }, r#"{"divisor":32,"min":1}"#);
    test(
        GlyphSpec::new(
            "g",
            Rgba([52, 168, 83, 255]),
            Sizing::BestFit {
                padding: Padding::Pixels(3),
            },
        )
        .role(FontRole::Bold),
        r#"{"text":"g","color":[52,168,83,255],"role":"bold","sizing":{"best_fit":{"padding":{"pixels":3}}},"embolden":"never"}"#,
    );
}

#[test]
fn layer_defaults() {
    let json = r#"{
        "kind": "centered",
        "glyph": {
            "text": "g",
            "color": [0, 0, 0, 255],
            "sizing": { "fraction": { "ratio": 0.5, "min": 8 } }
        }
    }"#;
    let layer: Layer = serde_json::from_str(json).unwrap();
    let expected = Layer::Centered {
        glyph: GlyphSpec::new("g", Rgba([0, 0, 0, 255]), Sizing::Fraction { ratio: 0.5, min: 8 }),
        lift: Lift::NONE,
    };
    assert_eq!(layer, expected);
}

#[test]
fn presets() {
    test(Preset::GOnW, r#""g-on-w""#);
    test(Preset::WgPair, r#""wg-pair""#);

    // Every shipped design survives a round trip
    for preset in Preset::ALL {
        let spec = preset.spec();
        let text = serde_json::to_string(&spec).unwrap();
        let back: glyph_icons::icon::IconSpec = serde_json::from_str(&text).unwrap();
        assert_eq!(back, spec);
    }
}
