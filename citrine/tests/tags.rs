//! Explicit tags and the tag registry.

#![allow(clippy::bool_assert_comparison)]

use citrine::{LoadError, TagRegistry, Yaml};

fn first(s: &str) -> Yaml {
    Yaml::load_from_str(s).unwrap().into_iter().next().unwrap()
}

#[test]
fn core_schema_tags() {
    assert_eq!(first("!!str 123").as_str().unwrap(), "123");
    assert_eq!(first("!!int 0x10").as_i64().unwrap(), 16);
    assert_eq!(first("!!float 1").as_f64().unwrap(), 1.0);
    assert_eq!(first("!!bool True"), Yaml::Boolean(true));
    assert_eq!(first("!!null ~"), Yaml::Null);
    assert!(first("!!timestamp 2002-12-14").is_timestamp());
    assert_eq!(first("!!seq [1]")[0].as_i64().unwrap(), 1);
    assert_eq!(first("!!map {a: 1}")["a"].as_i64().unwrap(), 1);
}

#[test]
fn contradicting_core_tags_are_bad_values() {
    assert!(first("!!int not-a-number").is_badvalue());
    assert!(first("!!float nope").is_badvalue());
    assert!(first("!!bool maybe").is_badvalue());
    assert!(first("!!null something").is_badvalue());
    assert!(first("!!timestamp yesterday").is_badvalue());
    assert!(first("!!binary '***'").is_badvalue());
    // shape mismatches
    assert!(first("!!seq {a: 1}").is_badvalue());
    assert!(first("!!map [1]").is_badvalue());
}

#[test]
fn binary_decodes_base64() {
    let doc = first("!!binary \"aGVsbG8=\"");
    assert_eq!(doc.as_binary().unwrap(), b"hello");

    // whitespace in the representation is ignored
    let doc = first("!!binary |\n  aGVs\n  bG8=\n");
    assert_eq!(doc.as_binary().unwrap(), b"hello");
}

#[test]
fn unknown_tags_wrap_the_raw_node() {
    let doc = first("!shape 12");
    let Yaml::Tagged(tag, node) = doc else { panic!() };
    assert_eq!(tag.uri(), "!shape");
    // the scalar stays raw for caller-level dispatch, it is not implicitly resolved
    assert_eq!(*node, Yaml::String("12".into()));

    let doc = first("!shape {x: 1}");
    let Yaml::Tagged(tag, node) = doc else { panic!() };
    assert_eq!(tag.uri(), "!shape");
    assert_eq!(node["x"].as_i64().unwrap(), 1);
}

#[test]
fn strict_mode_refuses_unknown_tags() {
    let mut registry = TagRegistry::new();
    registry.set_strict(true);
    assert_eq!(
        Yaml::load_from_str_with("!shape 12", &registry).unwrap_err(),
        LoadError::UnsupportedTag("!shape".into())
    );

    // known tags still resolve
    registry.register("!shape", |node| Ok(node));
    assert!(Yaml::load_from_str_with("!shape 12", &registry).is_ok());
}

#[test]
fn registered_rules_decode_application_tags() {
    let s = "%TAG ! tag:clarkevans.com,2002:
--- !shape
- !circle
  center: &ORIGIN {x: 73, y: 129}
  radius: 7
- !line
  start: *ORIGIN
  finish: { x: 89, y: 102 }
- !label
  start: *ORIGIN
  color: 0xFFEEBB
  text: Pretty vector drawing.
";
    let mut registry = TagRegistry::new();
    registry.register("tag:clarkevans.com,2002:shape", |node| Ok(node));
    registry.register("tag:clarkevans.com,2002:circle", |node| {
        let radius = node["radius"].as_i64().unwrap_or(0);
        Ok(Yaml::Integer(radius))
    });

    let docs = Yaml::load_from_str_with(s, &registry).unwrap();
    let shapes = docs[0].as_vec().unwrap();
    assert_eq!(shapes.len(), 3);
    // the circle rule replaced the node entirely
    assert_eq!(shapes[0], Yaml::Integer(7));
    // un-registered tags fall back to `Tagged`
    let Yaml::Tagged(tag, line) = &shapes[1] else { panic!() };
    assert_eq!(tag.uri(), "tag:clarkevans.com,2002:line");
    assert_eq!(line["start"]["x"].as_i64().unwrap(), 73);
    assert_eq!(line["finish"]["y"].as_i64().unwrap(), 102);
    let Yaml::Tagged(tag, label) = &shapes[2] else { panic!() };
    assert_eq!(tag.uri(), "tag:clarkevans.com,2002:label");
    assert_eq!(label["color"].as_i64().unwrap(), 0x00FF_EEBB);
    assert_eq!(label["text"].as_str().unwrap(), "Pretty vector drawing.");
}

#[test]
fn caller_rules_override_builtins() {
    let mut registry = TagRegistry::new();
    registry.register("tag:yaml.org,2002:int", |node| match node {
        Yaml::String(v) => Ok(Yaml::String(format!("int:{v}"))),
        other => Ok(other),
    });
    let docs = Yaml::load_from_str_with("!!int 42", &registry).unwrap();
    assert_eq!(docs[0].as_str().unwrap(), "int:42");
}

#[test]
fn quoted_scalars_with_core_tags_stay_strings() {
    assert_eq!(first("!!int '12'").as_str().unwrap(), "12");
    assert_eq!(first("!!bool 'true'").as_str().unwrap(), "true");
}

#[test]
fn the_non_specific_tag_forces_a_string() {
    assert_eq!(first("! 12").as_str().unwrap(), "12");
}

#[test]
fn set_and_omap_via_explicit_nulls() {
    let doc = first("!!set {Mark McGwire: null, Sammy Sosa: null}");
    let set = doc.as_set().unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.contains(&Yaml::String("Mark McGwire".into())));
    assert!(set.contains(&Yaml::String("Sammy Sosa".into())));

    assert_eq!(
        Yaml::load_from_str("!!set {a: 1}").unwrap_err(),
        LoadError::NonNullSetValue
    );
    assert_eq!(
        Yaml::load_from_str("!!omap [a, b]").unwrap_err(),
        LoadError::InvalidOmapEntry
    );
}
