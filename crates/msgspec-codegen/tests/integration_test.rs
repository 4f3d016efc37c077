//! Integration tests for msgspec-codegen.
//!
//! Specs are built in memory through the validator so that each test controls
//! exactly which keys and templates reach the generator.

use msgspec_codegen::{AccessorGenerator, ArtifactShape, CodegenError, GeneratorOptions};
use msgspec_common::test_utils::init_test_logging;
use msgspec_core::{Bundle, LocaleMessageMap, LocaleTag, MsgSpecs, SignatureValidator};
use std::collections::{BTreeMap, HashSet};

fn tag(s: &str) -> LocaleTag {
    LocaleTag::parse(s).unwrap()
}

fn specs(main: &[(&str, &str)], fr: &[(&str, &str)]) -> MsgSpecs {
    let bundle = Bundle::builder("messages")
        .key_prefix("app.msg.")
        .main_locale("en-GB")
        .locale("fr-FR")
        .root("unused")
        .build()
        .unwrap();
    let mut maps = BTreeMap::new();
    maps.insert(
        tag("en-GB"),
        LocaleMessageMap::from_messages(tag("en-GB"), main.iter().copied()),
    );
    maps.insert(
        tag("fr-FR"),
        LocaleMessageMap::from_messages(tag("fr-FR"), fr.iter().copied()),
    );
    SignatureValidator::new(&bundle).validate(&maps)
}

fn generator() -> AccessorGenerator {
    AccessorGenerator::new(GeneratorOptions::default()).unwrap()
}

#[test]
fn test_greeting_accessor() {
    init_test_logging();
    let specs = specs(
        &[("greeting", "Hi {0}, you are {1,number} years old")],
        &[("greeting", "Bonjour {0}, vous avez {1,number} ans")],
    );

    let generated = generator().generate(&specs).unwrap();
    let source = generated.source();

    assert_eq!(generated.accessors(), ["greeting"]);
    assert!(generated.skipped().is_empty());
    assert!(source.starts_with("// @generated by msgspec-codegen"));
    assert!(source.contains("pub mod messages {"));
    assert!(source.contains("pub const MAIN_LOCALE: &str = \"en-GB\";"));
    assert!(source.contains("pub const GREETING: Greeting = Greeting;"));
    assert!(source.contains("pub const KEY: &'static str = \"app.msg.greeting\";"));
    assert!(source.contains("pub struct GreetingBuilder {"));
    assert!(source.contains(
        "pub fn arg0(mut self, value: impl ::core::convert::Into<::msgspec_runtime::MessageArg>) -> Self {"
    ));
    assert!(source.contains(
        "pub fn arg1(mut self, value: impl ::core::convert::Into<::msgspec_runtime::Number>) -> Self {"
    ));
    assert!(source.contains("(\"fr-FR\", \"Bonjour {0}, vous avez {1,number} ans\"),"));
    assert!(source.contains(
        "::msgspec_runtime::render(Greeting::TEMPLATES, MAIN_LOCALE, locale, &self.args)"
    ));
    assert!(source.contains(
        "let mut args = ::msgspec_runtime::parse(Greeting::TEMPLATES, MAIN_LOCALE, locale, text)?;"
    ));
    assert!(source.contains("args.resize(2, ::msgspec_runtime::MessageArg::Missing);"));
}

#[test]
fn test_output_is_deterministic() {
    let main = [
        ("zeta", "Z {0,date}"),
        ("alpha", "A"),
        ("mid.value", "{0,choice,0#none|1#one|1<{0} many}"),
    ];
    let fr = [("alpha", "A"), ("mid.value", "{0,choice,0#rien|1#un|1<{0}}"), ("zeta", "Z {0,date}")];

    let first = generator().generate(&specs(&main, &fr)).unwrap();
    let second = generator().generate(&specs(&main, &fr)).unwrap();

    assert_eq!(first.source(), second.source());
    assert_eq!(first.accessors(), ["alpha", "mid.value", "zeta"]);

    let source = first.source();
    let alpha = source.find("pub const ALPHA").unwrap();
    let mid = source.find("pub const MID_VALUE").unwrap();
    let zeta = source.find("pub const ZETA").unwrap();
    assert!(alpha < mid && mid < zeta);
    assert!(source.contains("impl ::core::convert::Into<::msgspec_runtime::DateTimeValue>"));
}

#[test]
fn test_zero_argument_key_gets_direct_finalizer() {
    let specs = specs(&[("title", "Messages")], &[("title", "Messages")]);
    let source = generator().generate(&specs).unwrap().into_source();

    assert!(source.contains("args: ::std::vec![::msgspec_runtime::MessageArg::Missing; 0],"));
    assert_eq!(source.matches("pub fn with_locale").count(), 2);
    assert!(!source.contains("pub fn arg0"));
}

#[test]
fn test_parse_errors_and_collisions_are_skipped() {
    init_test_logging();
    let specs = specs(
        &[
            ("broken", "Oops {0"),
            ("good", "Fine {0}"),
            ("good.one", "One"),
            ("good_one", "Other one"),
            ("keys", "Reserved"),
            ("late", "Late {0}"),
        ],
        &[
            ("broken", "Oops {0}"),
            ("good", "Bien {0}"),
            ("good.one", "Un"),
            ("good_one", "Autre"),
            ("keys", "Reserve"),
            ("late", "Tard {0"),
        ],
    );

    let generated = generator().generate(&specs).unwrap();

    assert_eq!(generated.accessors(), ["good", "good.one"]);
    let skipped: Vec<&str> = generated.skipped().iter().map(|s| s.key.as_str()).collect();
    assert_eq!(skipped, vec!["broken", "good_one", "keys", "late"]);
    assert_eq!(generated.source().matches("pub struct GoodOne;").count(), 1);
}

#[test]
fn test_taken_type_name_falls_back_to_message_suffix() {
    let specs = specs(
        &[("title", "A"), ("title_", "B")],
        &[("title", "A"), ("title_", "B")],
    );

    let generated = generator().generate(&specs).unwrap();
    let source = generated.source();

    assert_eq!(generated.accessors(), ["title", "title_"]);
    assert!(generated.skipped().is_empty());
    assert!(source.contains("pub const TITLE: Title = Title;"));
    assert!(source.contains("pub const TITLE_: TitleMessage = TitleMessage;"));
    assert!(source.contains("pub struct TitleMessageBuilder {"));
}

#[test]
fn test_constants_and_types_never_share_a_name() {
    init_test_logging();
    let keys = [
        ("a_b", "Joined"),
        ("ab", "Plain"),
        ("greeting", "Hi {0}"),
        ("greeting_builder", "Builder"),
        ("x", "X marks the spot"),
    ];
    let options = GeneratorOptions {
        shape: ArtifactShape::Flat,
        ..GeneratorOptions::default()
    };

    let generated = AccessorGenerator::new(options)
        .unwrap()
        .generate(&specs(&keys, &keys))
        .unwrap();
    let source = generated.source();

    assert_eq!(generated.accessors(), ["a_b", "ab", "greeting", "greeting_builder", "x"]);
    assert!(generated.skipped().is_empty());
    assert!(source.contains("pub const X: XMessage = XMessage;"));
    assert!(source.contains("pub const AB: Ab = Ab;"));
    assert!(source.contains("pub const A_B: ABMessage = ABMessage;"));
    assert!(source.contains("pub struct GreetingBuilder {"));
    assert!(source.contains(
        "pub const GREETING_BUILDER: GreetingBuilderMessage = GreetingBuilderMessage;"
    ));

    let mut names = HashSet::new();
    for line in source.lines() {
        let item = line
            .strip_prefix("pub const ")
            .or_else(|| line.strip_prefix("pub struct "));
        if let Some(item) = item {
            let name: String = item
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            assert!(names.insert(name.clone()), "'{name}' is defined twice");
        }
    }
    assert_eq!(names.len(), 3 + 5 * 3);
}

#[test]
fn test_empty_bundle() {
    let specs = specs(&[("broken", "{0")], &[("broken", "{0}")]);

    let err = generator().generate(&specs).unwrap_err();

    assert!(matches!(err, CodegenError::EmptyBundle { ref bundle } if bundle == "messages"));
}

#[test]
fn test_flat_shape_and_custom_runtime_path() {
    let options = GeneratorOptions {
        shape: ArtifactShape::Flat,
        namespace: "ignored in flat".to_string(),
        runtime_path: "crate::i18n::runtime".to_string(),
    };
    let specs = specs(&[("count", "{0,number}")], &[("count", "{0,number}")]);

    let source = AccessorGenerator::new(options).unwrap().generate(&specs).unwrap().into_source();

    assert!(!source.contains("pub mod"));
    assert!(source.contains("pub const COUNT: Count = Count;\n"));
    assert!(source.contains("impl ::core::convert::Into<crate::i18n::runtime::Number>"));
}

#[test]
fn test_invalid_options() {
    let bad_namespace = GeneratorOptions {
        namespace: "type".to_string(),
        ..GeneratorOptions::default()
    };
    assert!(matches!(
        AccessorGenerator::new(bad_namespace),
        Err(CodegenError::InvalidOptions(_))
    ));

    let bad_path = GeneratorOptions {
        runtime_path: "not a path".to_string(),
        ..GeneratorOptions::default()
    };
    assert!(matches!(
        AccessorGenerator::new(bad_path),
        Err(CodegenError::InvalidOptions(_))
    ));

    assert_eq!("flat".parse::<ArtifactShape>().unwrap(), ArtifactShape::Flat);
    assert!("nested".parse::<ArtifactShape>().is_err());
}
