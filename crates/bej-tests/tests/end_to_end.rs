//! End-to-end decoding: dictionaries and payloads built with the fixture
//! builders, decoded to text, compared against inline insta snapshots.
//!
//! Every rendered document is also parsed with `serde_json` so layout
//! regressions that still snapshot cleanly cannot slip through as
//! malformed JSON.

use bej_decoder::{BejDecoder, DecoderConfig, decode_to_json};
use bej_tests::{DictionaryBuilder, PayloadBuilder, SchemaNode, Value, member, thermal};
use bej_wire::Format;
use insta::assert_snapshot;

fn decode(dict: &DictionaryBuilder, payload: &PayloadBuilder) -> String {
    let json = decode_to_json(&payload.build(), &dict.load())
        .unwrap_or_else(|e| panic!("decode failed: {e}"));
    serde_json::from_str::<serde_json::Value>(&json)
        .unwrap_or_else(|e| panic!("output is not valid JSON ({e}):\n{json}"));
    json
}

// ── Thermal resource ──────────────────────────────────────────────────────────

#[test]
fn thermal_resource() {
    let json = decode(&thermal::schema(), &thermal::payload());
    assert_snapshot!(json, @r#"
    {
      "Fans": [
        {
          "MemberId": "0",
          "Name": "Fan0",
          "Reading": 4200,
          "ReadingUnits": "RPM",
          "Status": {
            "Health": "OK",
            "State": "Enabled"
          }
        },
        {
          "MemberId": "1",
          "Name": "Fan1",
          "Reading": 3900,
          "ReadingUnits": "RPM",
          "Status": {
            "Health": "Warning",
            "State": "Enabled"
          }
        }
      ],
      "Id": "Thermal",
      "Name": "Thermal Metrics",
      "PowerSaving": false,
      "Redundancy": null,
      "Temperatures": [
        {
          "Name": "CPU1",
          "ReadingCelsius": 41.5,
          "UpperThresholdCritical": 95
        }
      ]
    }
    "#);
}

#[test]
fn thermal_values_survive_json_parse() {
    let json = decode(&thermal::schema(), &thermal::payload());
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["Fans"][1]["Status"]["Health"], "Warning");
    assert_eq!(v["Temperatures"][0]["ReadingCelsius"], 41.5);
    assert!(v["Redundancy"].is_null());
}

#[test]
fn members_decode_in_wire_order() {
    // Payload order, not dictionary order, decides output order.
    let payload = PayloadBuilder::new(Value::set([
        member(2, Value::string("Thermal Metrics")),
        member(1, Value::string("Thermal")),
    ]));
    assert_snapshot!(decode(&thermal::schema(), &payload), @r#"
    {
      "Name": "Thermal Metrics",
      "Id": "Thermal"
    }
    "#);
}

// ── Minimal documents ─────────────────────────────────────────────────────────

#[test]
fn empty_root_set() {
    let payload = PayloadBuilder::new(Value::set([]));
    assert_eq!(decode(&thermal::schema(), &payload), "{}");
}

#[test]
fn single_boolean_member() {
    let dict = DictionaryBuilder::new(
        SchemaNode::new(Format::Set, 0, "Root")
            .child(SchemaNode::new(Format::Boolean, 0, "Enabled")),
    );
    let payload = PayloadBuilder::new(Value::set([member(0, Value::Boolean(true))]));
    assert_snapshot!(decode(&dict, &payload), @r#"
    {
      "Enabled": true
    }
    "#);
}

#[test]
fn empty_nested_containers_stay_on_one_line() {
    let payload = PayloadBuilder::new(Value::set([
        member(0, Value::array([])),
        member(5, Value::array([Value::set([])])),
    ]));
    assert_snapshot!(decode(&thermal::schema(), &payload), @r#"
    {
      "Fans": [],
      "Temperatures": [
        {}
      ]
    }
    "#);
}

// ── Scalars ───────────────────────────────────────────────────────────────────

fn scalar_schema() -> DictionaryBuilder {
    DictionaryBuilder::new(SchemaNode::new(Format::Set, 0, "Root").children([
        SchemaNode::new(Format::Integer, 0, "Int"),
        SchemaNode::new(Format::Real, 1, "Real"),
        SchemaNode::new(Format::String, 2, "Text"),
    ]))
}

#[test]
fn integer_extremes() {
    for (value, text) in [
        (0, "0"),
        (-1, "-1"),
        (32_767, "32767"),
        (-128, "-128"),
        (i64::MAX, "9223372036854775807"),
        (i64::MIN, "-9223372036854775808"),
    ] {
        let payload = PayloadBuilder::new(Value::set([member(0, Value::Integer(value))]));
        assert_eq!(
            decode(&scalar_schema(), &payload),
            format!("{{\n  \"Int\": {text}\n}}")
        );
    }
}

#[test]
fn reals_render_symbolically() {
    for (real, text) in [
        (Value::real(3, 0, 14159, 0), "3.14159"),
        (Value::real(1, 2, 5, 0), "1.005"),
        (Value::real(-2, 0, 5, -3), "-2.5e-3"),
        (Value::real(6, 0, 2, 23), "6.2e23"),
        (Value::real(0, 0, 0, 0), "0.0"),
    ] {
        let payload = PayloadBuilder::new(Value::set([member(1, real)]));
        let json = decode(&scalar_schema(), &payload);
        assert_eq!(json, format!("{{\n  \"Real\": {text}\n}}"));
    }
}

#[test]
fn strings_are_escaped() {
    let payload = PayloadBuilder::new(Value::set([member(
        2,
        Value::string("say \"hi\"\\\n\tbell\u{7}"),
    )]));
    assert_snapshot!(decode(&scalar_schema(), &payload), @r#"
    {
      "Text": "say \"hi\"\\\n\tbell\u0007"
    }
    "#);
}

#[test]
fn non_ascii_strings_pass_through() {
    let payload = PayloadBuilder::new(Value::set([member(2, Value::string("Lüfter ✓"))]));
    let json = decode(&scalar_schema(), &payload);
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["Text"], "Lüfter ✓");
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[test]
fn custom_indent() {
    let dict = thermal::schema().load();
    let payload = PayloadBuilder::new(Value::set([member(3, Value::Boolean(true))])).build();
    let config = DecoderConfig {
        indent: 4,
        ..DecoderConfig::default()
    };
    let json = BejDecoder::with_config(&dict, config)
        .decode_to_string(&payload)
        .unwrap();
    assert_eq!(json, "{\n    \"PowerSaving\": true\n}");
}

#[test]
fn one_dictionary_many_decodes() {
    let dict = thermal::schema().load();
    let decoder = BejDecoder::new(&dict);
    let payload = thermal::payload().build();

    let first = decoder.decode_to_string(&payload).unwrap();
    let second = decoder.decode_to_string(&payload).unwrap();
    assert_eq!(first, second);

    let (dict, payload) = (&dict, &payload);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(move || BejDecoder::new(dict).decode_to_string(payload).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), first);
        }
    });
}

#[test]
fn writer_and_string_outputs_agree() {
    let dict = thermal::schema().load();
    let payload = thermal::payload().build();
    let decoder = BejDecoder::new(&dict);

    let mut buf = Vec::new();
    let outcome = decoder.decode_to_writer(&payload, &mut buf).unwrap();
    assert_eq!(outcome.consumed, payload.len());
    assert_eq!(outcome.trailing, 0);
    assert_eq!(String::from_utf8(buf).unwrap(), decoder.decode_to_string(&payload).unwrap());
}
