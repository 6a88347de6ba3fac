//! The canonical examples from chapter 2 of the YAML specification.

#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::float_cmp)]

use chrono::{FixedOffset, TimeZone};
use citrine::{LoadError, Yaml};

fn load(s: &str) -> Vec<Yaml> {
    Yaml::load_from_str(s).unwrap()
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Yaml {
    Yaml::Timestamp(
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap(),
    )
}

// Example 2.1: sequence of scalars
#[test]
fn example_2_1_sequence_of_scalars() {
    let doc = &load("- Mark McGwire\n- Sammy Sosa\n- Ken Griffey\n")[0];
    assert_eq!(doc.as_vec().unwrap().len(), 3);
    assert_eq!(doc[0].as_str().unwrap(), "Mark McGwire");
    assert_eq!(doc[2].as_str().unwrap(), "Ken Griffey");
}

// Example 2.2: mapping scalars to scalars
#[test]
fn example_2_2_mapping_scalars_to_scalars() {
    let s = "
hr:  65    # Home runs
avg: 0.278 # Batting average
rbi: 147   # Runs Batted In
";
    let doc = &load(s)[0];
    assert_eq!(doc["hr"].as_i64().unwrap(), 65);
    assert_eq!(doc["avg"].as_f64().unwrap(), 0.278);
    assert_eq!(doc["rbi"].as_i64().unwrap(), 147);
}

// Example 2.3: mapping scalars to sequences
#[test]
fn example_2_3_mapping_scalars_to_sequences() {
    let s = "
american:
  - Boston Red Sox
  - Detroit Tigers
  - New York Yankees
national:
  - New York Mets
  - Chicago Cubs
  - Atlanta Braves
";
    let doc = &load(s)[0];
    assert_eq!(doc["american"][0].as_str().unwrap(), "Boston Red Sox");
    assert_eq!(doc["national"][2].as_str().unwrap(), "Atlanta Braves");
}

// Example 2.4: sequence of mappings
#[test]
fn example_2_4_sequence_of_mappings() {
    let s = "
-
  name: Mark McGwire
  hr:   65
  avg:  0.278
-
  name: Sammy Sosa
  hr:   63
  avg:  0.288
";
    let doc = &load(s)[0];
    assert_eq!(doc[0]["name"].as_str().unwrap(), "Mark McGwire");
    assert_eq!(doc[1]["hr"].as_i64().unwrap(), 63);
    assert_eq!(doc[1]["avg"].as_f64().unwrap(), 0.288);
}

// Example 2.5: sequence of sequences
#[test]
fn example_2_5_sequence_of_sequences() {
    let s = "
- [name        , hr, avg  ]
- [Mark McGwire, 65, 0.278]
- [Sammy Sosa  , 63, 0.288]
";
    let doc = &load(s)[0];
    assert_eq!(doc[0][0].as_str().unwrap(), "name");
    assert_eq!(doc[1][0].as_str().unwrap(), "Mark McGwire");
    assert_eq!(doc[1][1].as_i64().unwrap(), 65);
    assert_eq!(doc[2][2].as_f64().unwrap(), 0.288);
}

// Example 2.6: mapping of mappings
#[test]
fn example_2_6_mapping_of_mappings() {
    let s = "
Mark McGwire: {hr: 65, avg: 0.278}
Sammy Sosa: {
    hr: 63,
    avg: 0.288,
  }
";
    let doc = &load(s)[0];
    assert_eq!(doc["Mark McGwire"]["hr"].as_i64().unwrap(), 65);
    assert_eq!(doc["Sammy Sosa"]["avg"].as_f64().unwrap(), 0.288);
}

// A flow mapping and the equivalent block mapping decode to the same value.
#[test]
fn flow_and_block_mappings_are_equal() {
    let flow = &load("{hr: 65, avg: 0.278}")[0];
    let block = &load("hr: 65\navg: 0.278\n")[0];
    assert_eq!(flow, block);
}

// Example 2.7: two documents in a stream
#[test]
fn example_2_7_two_documents_in_a_stream() {
    let s = "
# Ranking of 1998 home runs
---
- Mark McGwire
- Sammy Sosa
- Ken Griffey

# Team ranking
---
- Chicago Cubs
- St Louis Cardinals
";
    let docs = load(s);
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].as_vec().unwrap().len(), 3);
    assert_eq!(docs[1].as_vec().unwrap().len(), 2);
    assert_eq!(docs[1][0].as_str().unwrap(), "Chicago Cubs");
}

// Example 2.8: play by play feed
#[test]
fn example_2_8_play_by_play_feed() {
    let s = "---
time: 20:03:20
player: Sammy Sosa
action: strike (miss)
...
---
time: 20:03:47
player: Sammy Sosa
action: grand slam
...
";
    let docs = load(s);
    assert_eq!(docs.len(), 2);
    // sexagesimals are not resolved; the time stays a string
    assert_eq!(docs[0]["time"].as_str().unwrap(), "20:03:20");
    assert_eq!(docs[0]["action"].as_str().unwrap(), "strike (miss)");
    assert_eq!(docs[1]["action"].as_str().unwrap(), "grand slam");
}

// Example 2.9: single document with two comments
#[test]
fn example_2_9_anchored_sequences() {
    let s = "---
hr: # 1998 hr ranking
  - Mark McGwire
  - Sammy Sosa
rbi:
  # 1998 rbi ranking
  - Sammy Sosa
  - Ken Griffey
";
    let doc = &load(s)[0];
    assert_eq!(doc["hr"][1].as_str().unwrap(), "Sammy Sosa");
    assert_eq!(doc["rbi"][1].as_str().unwrap(), "Ken Griffey");
}

// Example 2.10: node appearing twice
#[test]
fn example_2_10_anchor_and_alias() {
    let s = "---
hr:
  - Mark McGwire
  # Following node labeled SS
  - &SS Sammy Sosa
rbi:
  - *SS # Subsequent occurrence
  - Ken Griffey
";
    let doc = &load(s)[0];
    assert_eq!(doc["hr"][1].as_str().unwrap(), "Sammy Sosa");
    assert_eq!(doc["rbi"][0].as_str().unwrap(), "Sammy Sosa");
    assert_eq!(doc["hr"][1], doc["rbi"][0]);
}

// Example 2.11: mapping between sequences
#[test]
fn example_2_11_mapping_between_sequences() {
    let s = "
? - Detroit Tigers
  - Chicago cubs
:
  - 2001-07-23

? [ New York Yankees,
    Atlanta Braves ]
: [ 2001-07-02, 2001-08-12,
    2001-08-14 ]
";
    let doc = &load(s)[0];
    let mapping = doc.as_hash().unwrap();
    assert_eq!(mapping.len(), 2);

    let key1 = Yaml::Sequence(vec![
        Yaml::String("Detroit Tigers".into()),
        Yaml::String("Chicago cubs".into()),
    ]);
    assert_eq!(
        mapping.get(&key1).unwrap(),
        &Yaml::Sequence(vec![utc(2001, 7, 23, 0, 0, 0)])
    );

    let key2 = Yaml::Sequence(vec![
        Yaml::String("New York Yankees".into()),
        Yaml::String("Atlanta Braves".into()),
    ]);
    assert_eq!(
        mapping.get(&key2).unwrap(),
        &Yaml::Sequence(vec![
            utc(2001, 7, 2, 0, 0, 0),
            utc(2001, 8, 12, 0, 0, 0),
            utc(2001, 8, 14, 0, 0, 0),
        ])
    );
}

// Example 2.12: compact nested mapping
#[test]
fn example_2_12_compact_nested_mapping() {
    let s = "---
# Products purchased
- item    : Super Hoop
  quantity: 1
- item    : Basketball
  quantity: 4
- item    : Big Shoes
  quantity: 1
";
    let doc = &load(s)[0];
    assert_eq!(doc.as_vec().unwrap().len(), 3);
    assert_eq!(doc[0]["item"].as_str().unwrap(), "Super Hoop");
    assert_eq!(doc[1]["quantity"].as_i64().unwrap(), 4);
    assert_eq!(doc[2]["item"].as_str().unwrap(), "Big Shoes");
}

// Example 2.13: in literals, newlines are preserved
#[test]
fn example_2_13_literal_newlines_preserved() {
    let s = "# ASCII Art
--- |
  \\//||\\/||
  // ||  ||__
";
    let doc = &load(s)[0];
    assert_eq!(doc.as_str().unwrap(), "\\//||\\/||\n// ||  ||__\n");
}

// Example 2.14: in the folded scalars, newlines become spaces
#[test]
fn example_2_14_folded_newlines_become_spaces() {
    let s = "--- >
  Mark McGwire's
  year was crippled
  by a knee injury.
";
    let doc = &load(s)[0];
    assert_eq!(
        doc.as_str().unwrap(),
        "Mark McGwire's year was crippled by a knee injury.\n"
    );
}

// Example 2.15: folded newlines are preserved for "more indented" and blank lines
#[test]
fn example_2_15_folded_more_indented_lines() {
    let s = ">
 Sammy Sosa completed another
 fine season with great stats.

   63 Home Runs
   0.288 Batting Average

 What a year!
";
    let doc = &load(s)[0];
    assert_eq!(
        doc.as_str().unwrap(),
        "Sammy Sosa completed another fine season with great stats.\n\n  63 Home Runs\n  0.288 Batting Average\n\nWhat a year!\n"
    );
}

// Example 2.16: indentation determines scope
#[test]
fn example_2_16_indentation_determines_scope() {
    let s = "name: Mark McGwire
accomplishment: >
  Mark set a major league
  home run record in 1998.
stats: |
  65 Home Runs
  0.278 Batting Average
";
    let doc = &load(s)[0];
    assert_eq!(doc["name"].as_str().unwrap(), "Mark McGwire");
    assert_eq!(
        doc["accomplishment"].as_str().unwrap(),
        "Mark set a major league home run record in 1998.\n"
    );
    assert_eq!(
        doc["stats"].as_str().unwrap(),
        "65 Home Runs\n0.278 Batting Average\n"
    );
}

// Example 2.17: quoted scalars
#[test]
fn example_2_17_quoted_scalars() {
    let s = r#"
unicode: "Sosa did fine.☺"
control: "\b1998\t1999\t2000\n"
hex esc: "\x0d\x0a is \r\n"
single: '"Howdy!" he cried.'
quoted: ' # Not a ''comment''.'
tie-fighter: '|\-*-/|'
"#;
    let doc = &load(s)[0];
    assert_eq!(doc["unicode"].as_str().unwrap(), "Sosa did fine.\u{263a}");
    assert_eq!(doc["control"].as_str().unwrap(), "\u{8}1998\t1999\t2000\n");
    assert_eq!(doc["hex esc"].as_str().unwrap(), "\r\n is \r\n");
    assert_eq!(doc["single"].as_str().unwrap(), "\"Howdy!\" he cried.");
    assert_eq!(doc["quoted"].as_str().unwrap(), " # Not a 'comment'.");
    assert_eq!(doc["tie-fighter"].as_str().unwrap(), "|\\-*-/|");
}

// Example 2.18: multi-line flow scalars
#[test]
fn example_2_18_multi_line_flow_scalars() {
    let s = "
plain:
  This unquoted scalar
  spans many lines.

quoted: \"So does this
  quoted scalar.\\n\"
";
    let doc = &load(s)[0];
    assert_eq!(
        doc["plain"].as_str().unwrap(),
        "This unquoted scalar spans many lines."
    );
    assert_eq!(
        doc["quoted"].as_str().unwrap(),
        "So does this quoted scalar.\n"
    );
}

// Example 2.19: integers
#[test]
fn example_2_19_integers() {
    let s = "
canonical: 12345
decimal: +12345
octal: 0o14
hexadecimal: 0xC
";
    let doc = &load(s)[0];
    assert_eq!(doc["canonical"].as_i64().unwrap(), 12345);
    assert_eq!(doc["decimal"].as_i64().unwrap(), 12345);
    assert_eq!(doc["octal"].as_i64().unwrap(), 12);
    assert_eq!(doc["hexadecimal"].as_i64().unwrap(), 12);
}

// Example 2.20: floating point
#[test]
fn example_2_20_floating_point() {
    let s = "
canonical: 1.23015e+3
exponential: 12.3015e+02
fixed: 1230.15
negative infinity: -.inf
not a number: .nan
";
    let doc = &load(s)[0];
    assert_eq!(doc["canonical"].as_f64().unwrap(), 1230.15);
    assert_eq!(doc["exponential"].as_f64().unwrap(), 1230.15);
    assert_eq!(doc["fixed"].as_f64().unwrap(), 1230.15);
    assert_eq!(doc["negative infinity"].as_f64().unwrap(), f64::NEG_INFINITY);
    assert!(doc["not a number"].as_f64().unwrap().is_nan());
}

// Example 2.21: miscellaneous
#[test]
fn example_2_21_miscellaneous() {
    let s = "
null:
booleans: [ true, false ]
string: '012345'
";
    let doc = &load(s)[0];
    let mapping = doc.as_hash().unwrap();
    assert_eq!(mapping.get(&Yaml::Null).unwrap(), &Yaml::Null);
    assert_eq!(doc["booleans"][0].as_bool().unwrap(), true);
    assert_eq!(doc["booleans"][1].as_bool().unwrap(), false);
    // quoting inhibits implicit resolution
    assert_eq!(doc["string"].as_str().unwrap(), "012345");
}

// Example 2.22: timestamps
#[test]
fn example_2_22_timestamps() {
    let s = "
canonical: 2001-12-15T02:59:43.1Z
iso8601: 2001-12-14t21:59:43.10-05:00
spaced: 2001-12-14 21:59:43.10 -5
date: 2002-12-14
";
    let doc = &load(s)[0];
    assert!(doc["canonical"].is_timestamp());
    assert!(doc["iso8601"].is_timestamp());
    assert!(doc["spaced"].is_timestamp());
    assert!(doc["date"].is_timestamp());

    // all three datetime forms denote the very same instant
    assert_eq!(doc["canonical"], doc["iso8601"]);
    assert_eq!(doc["canonical"], doc["spaced"]);

    // a bare date is midnight UTC
    assert_eq!(doc["date"], utc(2002, 12, 14, 0, 0, 0));
}

// Example 2.23: various explicit tags
#[test]
fn example_2_23_various_explicit_tags() {
    let s = "---
not-date: !!str 2002-04-28

picture: !!binary |
 R0lGODlhDAAMAIQAAP//9/X
 17unp5WZmZgAAAOfn515eXv
 Pz7Y6OjuDg4J+fn5OTk6enp
 56enmleECcgggoBADs=

application specific tag: !something |
 The semantics of the tag
 above may be different for
 different documents.
";
    let doc = &load(s)[0];
    assert_eq!(doc["not-date"].as_str().unwrap(), "2002-04-28");

    let picture = doc["picture"].as_binary().unwrap();
    assert_eq!(picture.len(), 65);
    assert!(picture.starts_with(b"GIF89a"));

    let Yaml::Tagged(tag, node) = &doc["application specific tag"] else {
        panic!()
    };
    assert_eq!(tag.uri(), "!something");
    assert_eq!(
        node.as_str().unwrap(),
        "The semantics of the tag\nabove may be different for\ndifferent documents.\n"
    );
}

// Example 2.25: unordered sets
#[test]
fn example_2_25_unordered_sets() {
    let s = "# Sets are represented as a
# Mapping where each key is
# associated with a null value
--- !!set
? Mark McGwire
? Sammy Sosa
? Ken Griffey
";
    let doc = &load(s)[0];
    let set = doc.as_set().unwrap();
    assert_eq!(set.len(), 3);
    assert!(set.contains(&Yaml::String("Sammy Sosa".into())));

    // flow form, with explicit nulls
    let flow = &load("!!set {Mark McGwire: null, Sammy Sosa: null, Ken Griffey: null}")[0];
    // set equality carries no ordering requirement
    let reordered = &load("!!set {Ken Griffey: null, Sammy Sosa: null, Mark McGwire: null}")[0];
    assert_eq!(doc, flow);
    assert_eq!(doc, reordered);
}

#[test]
fn duplicate_set_key_is_an_error() {
    let s = "--- !!set\n? Sammy Sosa\n? Sammy Sosa\n";
    assert_eq!(
        Yaml::load_from_str(s).unwrap_err(),
        LoadError::DuplicateSetKey
    );
}

// Example 2.26: ordered mappings
#[test]
fn example_2_26_ordered_mappings() {
    let s = "# The ~/% rank of a player
--- !!omap
- Mark McGwire: 65
- Sammy Sosa: 63
- Ken Griffey: 58
";
    let doc = &load(s)[0];
    let omap = doc.as_omap().unwrap();
    assert_eq!(omap.len(), 3);
    assert_eq!(
        omap[0],
        (Yaml::String("Mark McGwire".into()), Yaml::Integer(65))
    );
    assert_eq!(
        omap[2],
        (Yaml::String("Ken Griffey".into()), Yaml::Integer(58))
    );
}

#[test]
fn multi_key_omap_entry_is_an_error() {
    let s = "--- !!omap\n- a: 1\n  b: 2\n";
    assert_eq!(
        Yaml::load_from_str(s).unwrap_err(),
        LoadError::InvalidOmapEntry
    );
}

// Example 2.27: invoice
#[test]
fn example_2_27_invoice() {
    let s = "--- !<tag:clarkevans.com,2002:invoice>
invoice: 34843
date   : 2001-01-23
bill-to: &id001
    given  : Chris
    family : Dumars
    address:
        lines: |
            458 Walkman Dr.
            Suite #292
        city    : Royal Oak
        state   : MI
        postal  : 48046
ship-to: *id001
tax  : 251.42
total: 4443.52
comments: >
    Late afternoon is best.
    Backup contact is Nancy
    Billsmer @ 338-4338.
";
    let root = &load(s)[0];
    let Yaml::Tagged(tag, doc) = root else { panic!() };
    assert_eq!(tag.uri(), "tag:clarkevans.com,2002:invoice");

    assert_eq!(doc["invoice"].as_i64().unwrap(), 34843);
    assert_eq!(doc["date"], utc(2001, 1, 23, 0, 0, 0));
    assert_eq!(doc["bill-to"]["given"].as_str().unwrap(), "Chris");
    assert_eq!(
        doc["bill-to"]["address"]["lines"].as_str().unwrap(),
        "458 Walkman Dr.\nSuite #292\n"
    );
    assert_eq!(doc["bill-to"]["address"]["postal"].as_i64().unwrap(), 48046);
    // the alias resolves to the very same mapping
    assert_eq!(doc["ship-to"], doc["bill-to"]);
    assert_eq!(doc["tax"].as_f64().unwrap(), 251.42);
    assert_eq!(
        doc["comments"].as_str().unwrap(),
        "Late afternoon is best. Backup contact is Nancy Billsmer @ 338-4338.\n"
    );
}

// Example 2.28: log file
#[test]
fn example_2_28_log_file() {
    let s = "---
Time: 2001-11-23 15:01:42 -5
User: ed
Warning:
  This is an error message
  for the log file
---
Time: 2001-11-23 15:02:31 -5
User: ed
Warning:
  A slightly different error
  message.
";
    let docs = load(s);
    assert_eq!(docs.len(), 2);
    assert!(docs[0]["Time"].is_timestamp());
    assert_eq!(docs[0]["User"].as_str().unwrap(), "ed");
    assert_eq!(
        docs[0]["Warning"].as_str().unwrap(),
        "This is an error message for the log file"
    );
    assert_eq!(
        docs[1]["Warning"].as_str().unwrap(),
        "A slightly different error message."
    );
}
