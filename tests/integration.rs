use std::collections::HashMap;

use shline::parse::parse;
use shline::resolve::{self, SharedResolver};
use shline::{Argument, Line, Segment, Sh, expand};

fn hello_env() -> HashMap<String, String> {
    HashMap::from([("hello".to_string(), "world".to_string())])
}

/// Map `{hello: world}` chained before the process environment.
fn hello_chain() -> SharedResolver {
    resolve::chain([resolve::map(hello_env()), resolve::env()])
}

fn args_for(line: &str) -> Vec<String> {
    Sh::new().env(hello_env()).line(line).args()
}

fn args_with(resolver: SharedResolver, line: &str) -> Vec<String> {
    Sh::new().env(hello_env()).expand(resolver).line(line).args()
}

macro_rules! args_test {
    ($name:ident, $line:expr, [$($arg:expr),* $(,)?]) => {
        #[test]
        fn $name() {
            let expected: Vec<&str> = vec![$($arg),*];
            assert_eq!(args_for($line), expected, "line: {}", $line);
        }
    };
}

macro_rules! disabled_test {
    ($name:ident, $line:expr, [$($arg:expr),* $(,)?]) => {
        #[test]
        fn $name() {
            let expected: Vec<&str> = vec![$($arg),*];
            assert_eq!(
                args_with(resolve::disabled(), $line),
                expected,
                "line: {}",
                $line,
            );
        }
    };
}

// ── Tokenizer structure ──

#[test]
fn parse_single_quoted_reference() {
    assert_eq!(
        parse("go '${hello}'"),
        Line::new(vec![
            Argument::new(vec![Segment::expandable("go")]),
            Argument::new(vec![Segment::literal("${hello}")]),
        ])
    );
}

#[test]
fn parse_bare_reference() {
    assert_eq!(
        parse("echo ${hello}"),
        Line::new(vec![
            Argument::new(vec![Segment::expandable("echo")]),
            Argument::new(vec![Segment::expandable("${hello}")]),
        ])
    );
}

#[test]
fn parse_concatenated_quotes() {
    let line = parse("go ab'c def 'hig\" lmn \"opq");
    assert_eq!(line.len(), 2);
    assert_eq!(
        line.args()[1].segments(),
        &[
            Segment::expandable("ab"),
            Segment::literal("c def "),
            Segment::expandable("hig"),
            Segment::expandable(" lmn "),
            Segment::expandable("opq"),
        ]
    );
}

#[test]
fn parse_unclosed_quote_is_literal_segment() {
    let line = parse("go hi 'this is an unclosed quote arg");
    assert_eq!(
        line.args()[2].segments(),
        &[Segment::literal("this is an unclosed quote arg")]
    );
}

#[test]
fn parse_literal_reconstructs_normalized_input() {
    let line = parse("  a'b c'\"d\" \t e  ");
    assert_eq!(line.literal(), vec!["ab cd", "e"]);
}

// ── Expansion ──

args_test!(expand_by_default, "go ${hello}", ["go", "world"]);
args_test!(expand_bare, "go $hello", ["go", "world"]);
args_test!(map_before_env, "go ${hello} world", ["go", "world", "world"]);
args_test!(
    whitespace_trimmed,
    "  go \t   hello \n  world \r rocks   ",
    ["go", "hello", "world", "rocks"]
);
args_test!(double_quotes_group, r#"go "${hello} world""#, ["go", "world world"]);
args_test!(
    single_quotes_disable_expansion,
    "go '${hello}' ${hello}",
    ["go", "${hello}", "world"]
);
args_test!(
    quotes_concatenate,
    r#"go ab'c def 'hig" lmn "opq"#,
    ["go", "abc def hig lmn opq"]
);
args_test!(
    unclosed_single_quote,
    "go hi 'this is an unclosed quote arg",
    ["go", "hi", "this is an unclosed quote arg"]
);
args_test!(
    unclosed_double_quote,
    r#"go hi "this is an unclosed quote arg"#,
    ["go", "hi", "this is an unclosed quote arg"]
);
args_test!(escaped_double_quote, r#"go "hi \" there""#, ["go", r#"hi " there"#]);
args_test!(
    no_escape_in_single_quotes,
    r"go 'hi \' the ' other",
    ["go", r"hi \", "the", " other"]
);
args_test!(
    opposite_quotes_are_literal,
    r#"go '"arg1"' "'arg2'""#,
    ["go", r#""arg1""#, "'arg2'"]
);
args_test!(empty_quotes_pass_empty_arg, "printf '%s|' '' x", ["printf", "%s|", "", "x"]);
args_test!(missing_var_is_empty, "go a${shline_surely_unset_8c1f}b", ["go", "ab"]);
args_test!(stray_dollar_kept, "echo $ 5$", ["echo", "$", "5$"]);
args_test!(unclosed_brace_kept, "echo ${hello", ["echo", "${hello"]);
args_test!(empty_line, "", []);
args_test!(blank_line, " \t\n ", []);

// ── Disabled expansion ──

disabled_test!(disabled_keeps_reference, "go ${hello}", ["go", "${hello}"]);
disabled_test!(
    disabled_still_strips_quotes,
    r#"go "$hello there" '${x}'"#,
    ["go", "$hello there", "${x}"]
);

#[test]
fn line_args_disabled_verbatim() {
    let args = Sh::new()
        .env(hello_env())
        .expand(resolve::disabled())
        .line_args(["go", r#"'"${hello}"'"#])
        .args();
    assert_eq!(args, ["go", r#"'"${hello}"'"#]);
}

#[test]
fn line_args_skip_quote_processing() {
    let args = Sh::new()
        .env(hello_env())
        .line_args(["go", r#"'"arg1"'"#, r#""'arg2'""#])
        .args();
    assert_eq!(args, ["go", r#"'"arg1"'"#, r#""'arg2'""#]);
}

#[test]
fn line_args_still_expand() {
    let args = Sh::new()
        .env(hello_env())
        .line_args(["go", r#"'"${hello}"'"#])
        .args();
    assert_eq!(args, ["go", r#"'"world"'"#]);
}

// ── Resolvers ──

#[test]
fn resolve_with_chain_directly() {
    let line = parse("go ${hello} world");
    assert_eq!(
        expand::resolve(&line, &hello_chain()),
        vec!["go", "world", "world"]
    );
}

#[test]
fn not_found_resolver_empties_references() {
    let args = Sh::new()
        .expand(resolve::not_found())
        .line("echo [$PATH] [${HOME}]")
        .args();
    assert_eq!(args, ["echo", "[]", "[]"]);
}

#[test]
fn single_quoted_input_round_trips_under_any_resolver() {
    let raw = "'$PATH ${x} \\ \" $'";
    let resolvers = [
        resolve::env(),
        resolve::not_found(),
        resolve::disabled(),
        resolve::fail(),
        hello_chain(),
    ];
    for r in resolvers {
        assert_eq!(
            expand::resolve(&parse(raw), &r),
            vec![r#"$PATH ${x} \ " $"#]
        );
    }
}

#[test]
#[should_panic(expected = "can not find value to expand '${shline_surely_unset_8c1f}'")]
fn strict_chain_aborts_on_missing() {
    let strict = resolve::chain([resolve::env(), resolve::fail()]);
    Sh::new()
        .expand(strict)
        .line("echo ${shline_surely_unset_8c1f}")
        .args();
}

#[test]
fn strict_chain_ok_when_env_map_has_it() {
    let strict = resolve::chain([resolve::env(), resolve::fail()]);
    let args = Sh::new()
        .env(hello_env())
        .expand(strict)
        .line("echo ${hello}")
        .args();
    assert_eq!(args, ["echo", "world"]);
}

// ── Builder ──

#[test]
fn base_configuration_is_reusable() {
    let base = Sh::new().env(hello_env());

    let cmd = base.line("go version").command().unwrap();
    assert_eq!(cmd.get_current_dir(), None);

    let cmd = base.dir("/test").line("go version").command().unwrap();
    assert_eq!(cmd.get_current_dir(), Some(std::path::Path::new("/test")));

    // The dir set above did not leak into the base.
    let cmd = base.line("go version").command().unwrap();
    assert_eq!(cmd.get_current_dir(), None);
    assert!(
        cmd.get_envs()
            .any(|(k, v)| k == "hello" && v == Some(std::ffi::OsStr::new("world")))
    );
}

#[test]
fn display_requotes_for_logs() {
    let sh = Sh::new()
        .env(hello_env())
        .line("go \"${hello} world\" 'a\"b' plain \"tab\there\"");
    assert_eq!(
        sh.to_string(),
        r#"go "world world" "a\"b" plain "tab\there""#
    );
}

#[test]
fn split_uses_process_env() {
    let args = shline::split("echo 'single $x' \"a b\"");
    assert_eq!(args, ["echo", "single $x", "a b"]);
}

#[cfg(unix)]
#[test]
fn exec_runs_without_a_shell() {
    // `;` is an ordinary argument here, not a command separator.
    let rc = Sh::new().line("true ; false").exec().unwrap();
    assert_eq!(rc, 0);
}

#[cfg(unix)]
#[test]
fn exec_uses_env_and_dir() {
    let dir = std::fs::canonicalize(std::env::temp_dir()).unwrap();
    let mut env = hello_env();
    env.insert("SHLINE_TEST_DIR".into(), dir.to_string_lossy().into_owned());
    let rc = Sh::new()
        .env(env)
        .dir(&dir)
        .expand(resolve::disabled())
        .line_args([
            "sh",
            "-c",
            r#"test "$hello" = world && test "$(pwd -P)" = "$SHLINE_TEST_DIR""#,
        ])
        .exec()
        .unwrap();
    assert_eq!(rc, 0);
}
