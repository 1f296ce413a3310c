use assert_matches::assert_matches;
use rand::{thread_rng, Rng};
use rstest::rstest;
use scanopt::{ConfigError, DeclarationFault, OptionRegistry, OptionSpec, ParseError};
use std::cell::RefCell;

#[derive(Debug, Default, PartialEq)]
struct Outcome {
    verbose: bool,
    number: i32,
    ratio: f32,
    precise: f64,
    name: String,
    includes: String,
    globals: Vec<String>,
    counts: Vec<usize>,
    success: bool,
}

const FLAGS: [&str; 6] = ["-v", "-n", "-r", "-p", "-name", "-I"];

fn scan(argv: &[String]) -> Outcome {
    let mut outcome = Outcome::default();
    let globals = RefCell::new(Vec::default());
    let summary = OptionRegistry::new()
        .add(OptionSpec::flag("-v", &mut outcome.verbose))
        .add(OptionSpec::new("-n %d").bind(&mut outcome.number))
        .add(OptionSpec::new("-r %f").bind(&mut outcome.ratio))
        .add(OptionSpec::new("-p %F").bind(&mut outcome.precise))
        .add(OptionSpec::new("-name %s").bind(&mut outcome.name))
        .add(OptionSpec::new("-I %L").bind(&mut outcome.includes))
        .add(OptionSpec::global(|arguments| {
            globals.borrow_mut().extend_from_slice(arguments);
            Ok(())
        }))
        .build_parser()
        .unwrap()
        .parse_argv(argv);
    outcome.globals = globals.into_inner();
    outcome.counts = FLAGS.iter().map(|f| summary.times_matched(f)).collect();
    outcome.success = summary.is_success();
    outcome
}

fn random_word(rng: &mut impl Rng) -> String {
    let length = rng.gen_range(1..8);
    (0..length)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect()
}

fn random_argv(rng: &mut impl Rng) -> Vec<String> {
    let mut argv = vec!["program".to_string()];

    for _ in 0..rng.gen_range(0..20) {
        match rng.gen_range(0..7) {
            0 => argv.push("-v".to_string()),
            1 => {
                argv.push("-n".to_string());
                argv.push(rng.gen_range(-1000..1000).to_string());
            }
            2 => {
                argv.push("-r".to_string());
                argv.push(format!("{}", rng.gen_range(-10.0f32..10.0)));
            }
            3 => {
                argv.push("-p".to_string());
                argv.push(format!("{}", rng.gen::<f64>()));
            }
            4 => {
                argv.push("-name".to_string());
                argv.push(random_word(rng));
            }
            5 => {
                argv.push("-I".to_string());
                argv.push(random_word(rng));
            }
            _ => argv.push(random_word(rng)),
        }
    }

    argv
}

#[test]
fn rescan_is_deterministic() {
    let mut rng = thread_rng();

    for _ in 0..100 {
        let argv = random_argv(&mut rng);
        let first = scan(&argv);
        let second = scan(&argv);
        assert!(first.success, "{argv:?}");
        assert_eq!(first, second, "{argv:?}");
    }
}

#[test]
fn regular_option() {
    let mut number: i32 = 0;
    let mut text = String::default();
    let summary = OptionRegistry::new()
        .add(OptionSpec::new("-x %d %s").bind(&mut number).bind(&mut text))
        .build_parser()
        .unwrap()
        .parse_argv(&["program", "-x", "5", "hello"]);

    assert!(summary.is_success());
    assert_eq!(summary.times_matched("-x"), 1);
    assert_eq!(number, 5);
    assert_eq!(text, "hello");
}

#[rstest]
#[case(vec![], false)]
#[case(vec!["-v"], true)]
#[case(vec!["-v", "-v"], true)]
fn flag_option(#[case] tokens: Vec<&str>, #[case] expected: bool) {
    let mut verbose = false;
    let summary = OptionRegistry::new()
        .add(OptionSpec::flag("-v", &mut verbose))
        .build_parser()
        .unwrap()
        .parse_tokens(tokens.as_slice());

    assert!(summary.is_success());
    assert_eq!(summary.times_matched("-v"), tokens.len());
    assert_eq!(verbose, expected);
}

#[test]
fn string_append() {
    let mut includes = String::default();
    let summary = OptionRegistry::new()
        .add(OptionSpec::new("-I %L").bind(&mut includes))
        .build_parser()
        .unwrap()
        .parse_tokens(&["-I", "a", "-I", "b"]);

    assert!(summary.is_success());
    assert_eq!(includes, "a b");
}

#[rstest]
#[case("")]
#[case("%*")]
fn anonymous_global(#[case] declaration: &str) {
    let globals = RefCell::new(Vec::default());
    let mut verbose = false;
    let mut number: i32 = 0;
    let summary = OptionRegistry::new()
        .add(OptionSpec::new(declaration).callback(|arguments| {
            globals.borrow_mut().push(arguments.to_vec());
            Ok(())
        }))
        .add(OptionSpec::flag("-v", &mut verbose))
        .add(OptionSpec::new("-n %d").bind(&mut number))
        .build_parser()
        .unwrap()
        .parse_tokens(&["a", "-v", "b", "-n", "3", "c"]);

    assert!(summary.is_success());
    assert_eq!(globals.into_inner(), vec![vec!["a", "b", "c"]]);
    assert!(verbose);
    assert_eq!(number, 3);
}

#[test]
fn named_global() {
    let globals = RefCell::new(Vec::default());
    let files = RefCell::new(Vec::default());
    let mut verbose = false;
    let summary = OptionRegistry::new()
        .add(OptionSpec::global(|arguments| {
            globals.borrow_mut().extend_from_slice(arguments);
            Ok(())
        }))
        .add(OptionSpec::new("-files %*").callback(|arguments| {
            files.borrow_mut().extend_from_slice(arguments);
            Ok(())
        }))
        .add(OptionSpec::flag("-v", &mut verbose))
        .build_parser()
        .unwrap()
        .parse_tokens(&["a", "-files", "b", "c"]);

    assert!(summary.is_success());
    assert_eq!(summary.times_matched("-files"), 1);
    assert_eq!(globals.into_inner(), vec!["a"]);
    assert_eq!(files.into_inner(), vec!["b", "c"]);
}

#[test]
fn named_global_deactivated() {
    let files = RefCell::new(Vec::default());
    let mut verbose = false;
    let summary = OptionRegistry::new()
        .add(OptionSpec::new("-files %*").callback(|arguments| {
            files.borrow_mut().extend_from_slice(arguments);
            Ok(())
        }))
        .add(OptionSpec::flag("-v", &mut verbose))
        .build_parser()
        .unwrap()
        .parse_tokens(&["-files", "b", "-v", "c"]);

    assert_eq!(
        summary.error(),
        Some(&ParseError::UnassociatedArgument("c".to_string()))
    );
    assert!(files.into_inner().is_empty());
    assert!(verbose);
}

#[test]
fn duplicate_option() {
    let mut a: i32 = 0;
    let mut b = String::default();
    let mut c = false;
    let result = OptionRegistry::new()
        .add(OptionSpec::new("-x %d").bind(&mut a))
        .add(OptionSpec::new("-x %s").bind(&mut b))
        .add(OptionSpec::flag("-y", &mut c))
        .build_parser();

    assert_eq!(
        result.unwrap_err(),
        ConfigError::DuplicateOption("-x".to_string())
    );
}

#[rstest]
#[case("x", DeclarationFault::MissingDash)]
#[case("-1", DeclarationFault::MissingLetter)]
#[case("-x %q", DeclarationFault::UnrecognizedTypeCode('q'))]
#[case("-x %", DeclarationFault::DanglingPercent)]
fn malformed_declaration(#[case] declaration: &str, #[case] fault: DeclarationFault) {
    let mut a: i32 = 0;
    let result = OptionRegistry::new()
        .add(OptionSpec::new(declaration).bind(&mut a))
        .build_parser();

    assert_matches!(result, Err(ConfigError::MalformedDeclaration { fault: f, .. }) if f == fault);
}

#[test]
fn missing_parameter() {
    let mut a: i32 = 0;
    let mut b: i32 = 0;
    let summary = OptionRegistry::new()
        .add(OptionSpec::new("-x %d %d").bind(&mut a).bind(&mut b))
        .build_parser()
        .unwrap()
        .parse_tokens(&["-x", "5"]);

    assert_eq!(
        summary.error(),
        Some(&ParseError::MissingParameter {
            option: "-x".to_string(),
            position: 2,
        })
    );
    assert_eq!(
        summary.last_error(),
        "Parse error: missing parameter 2 from option '-x'."
    );
    assert_eq!(summary.times_matched("-x"), 0);
    assert_eq!(a, 5);
    assert_eq!(b, 0);
}

#[test]
fn unassociated_argument() {
    let mut verbose = false;
    let summary = OptionRegistry::new()
        .add(OptionSpec::flag("-v", &mut verbose))
        .build_parser()
        .unwrap()
        .parse_tokens(&["stray", "-v"]);

    assert_matches!(summary.into_result(), Err(ParseError::UnassociatedArgument(token)) if token == "stray");
    assert!(!verbose);
}

#[test]
fn unknown_option() {
    let mut verbose = false;
    let summary = OptionRegistry::new()
        .add(OptionSpec::flag("-v", &mut verbose))
        .build_parser()
        .unwrap()
        .parse_tokens(&["-v", "-ver"]);

    assert_eq!(summary.last_error(), "Parse error: invalid option '-ver'.");
    assert_eq!(summary.times_matched("-v"), 1);
    assert_eq!(summary.times_matched("-ver"), 0);
}

#[test]
fn callback_failure() {
    let summary = OptionRegistry::new()
        .add(OptionSpec::global(|arguments| {
            Err(format!("{} argument(s) rejected", arguments.len()))
        }))
        .build_parser()
        .unwrap()
        .parse_tokens(&["a", "b"]);

    assert_matches!(
        summary.error(),
        Some(ParseError::CallbackFailure { option, message }) if option == "%*" && message == "2 argument(s) rejected"
    );
}

#[rstest]
#[case("12abc", 12)]
#[case("abc", 0)]
#[case("-7", -7)]
fn permissive_conversion(#[case] token: &str, #[case] expected: i32) {
    let mut number: i32 = -1;
    let summary = OptionRegistry::new()
        .add(OptionSpec::new("-n %d").bind(&mut number))
        .build_parser()
        .unwrap()
        .parse_tokens(&["-n", token]);

    assert!(summary.is_success());
    assert_eq!(number, expected);
}

#[rstest]
#[case("12abc")]
#[case("abc")]
#[case("")]
fn strict_conversion(#[case] token: &str) {
    let mut number: i32 = -1;
    let summary = OptionRegistry::new()
        .add(OptionSpec::new("-n %d").bind(&mut number))
        .strict()
        .build_parser()
        .unwrap()
        .parse_tokens(&["-n", token]);

    assert_matches!(summary.error(), Some(ParseError::ValueConversion { token: t, .. }) if t == token);
    assert_eq!(number, -1);
}
