//! A self-hosting PEG metacompiler.
//!
//! `metapeg` compiles grammar files written in a small grammar-description
//! language into Rust source: an `install` function registering matcher
//! trees built from the combinators in [`support`]. Combined with the
//! embedded support module ([`SUPPORT`]), the emitted source recognizes and
//! transforms inputs exactly as the grammar prescribes.
//!
//! The compiler is its own first customer: [`parser`] and [`codegen`] are
//! generated files, produced from `grammars/parser.peg` and
//! `grammars/codegen.peg` by an earlier generation of the compiler, and
//! byte-identical to what the current generation emits from those sources
//! (the self-hosting fixed point).
//!
//! The pipeline is `characters → Parser → AST → CodeGenerator → characters`.
//! Both passes run on the same backtracking engine; the second one matches
//! over nested list trees instead of characters, descending into nodes and
//! dispatching on their constructor tags.

pub mod codegen;
pub mod interp;
pub mod parser;
pub mod support;

use support::{compile_chain, CompileError, Rules, Value};

/// The embedded runtime-support source, emitted verbatim by `--support` and
/// shipped alongside generated grammar modules.
pub const SUPPORT: &str = include_str!("support.rs");

/// The rules a grammar file is compiled through, in order.
pub const COMPILE_CHAIN: &[&str] = &["Parser.file", "CodeGenerator.asts"];

/// The bootstrap rule registry: the Parser and CodeGenerator grammars.
#[must_use]
pub fn bootstrap_rules() -> Rules {
    let mut rules = Rules::new();
    parser::install(&mut rules);
    codegen::install(&mut rules);
    rules
}

/// Parse grammar source into its AST (the first pipeline stage only).
///
/// # Errors
///
/// Fails with the furthest match failure if the source is not a grammar.
pub fn parse_source(source: &str) -> Result<Value, CompileError> {
    let rules = bootstrap_rules();
    compile_chain(&rules, &COMPILE_CHAIN[..1], Value::from(source))
}

/// Compile grammar source to Rust matcher source.
///
/// # Errors
///
/// Fails with the furthest match failure on invalid source, or an evaluation
/// failure from a semantic action.
pub fn compile_source(source: &str) -> Result<String, CompileError> {
    let rules = bootstrap_rules();
    compile_with(&rules, source)
}

/// Like [`compile_source`], but against a pre-built registry (which must
/// contain the [`COMPILE_CHAIN`] rules).
///
/// # Errors
///
/// See [`compile_source`].
pub fn compile_with(rules: &Rules, source: &str) -> Result<String, CompileError> {
    compile_chain(rules, COMPILE_CHAIN, Value::from(source)).map(|value| value.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_source_builds_tagged_namespace_nodes() {
        let ast = parse_source("Grammar { x = . }").unwrap();
        let namespaces = match ast {
            Value::List(items) => items.borrow().clone(),
            other => panic!("expected a list of namespaces, got {}", other.repr()),
        };
        assert_eq!(namespaces.len(), 1);
        let node = match &namespaces[0] {
            Value::List(items) => items.borrow().clone(),
            other => panic!("expected a namespace node, got {}", other.repr()),
        };
        assert_eq!(node[0], Value::from("Namespace"));
        assert_eq!(node[1], Value::from("Grammar"));
    }

    #[test]
    fn test_compile_emits_a_registration_per_rule() {
        let output = compile_source("Grammar {\n  x = 'a'-'c'\n  y = x\n}\n").unwrap();
        assert!(output.contains("rules.insert(\"Grammar.x\", or(vec!["));
        assert!(output.contains("match_object(Pred::Range('a', 'c'))"));
        assert!(output.contains("rules.insert(\"Grammar.y\", or(vec!["));
        assert!(output.contains("match_rule(\"Grammar.x\")"));
        assert!(output.starts_with("//! @generated by metapeg --compile."));
        assert!(output.ends_with("}\n"));
    }

    #[test]
    fn test_compile_rejects_mid_sequence_actions() {
        // A semantic action is only admitted in trailing position of a
        // sequence, so this must already fail to parse.
        let error = compile_source("Grammar { x = . -> [] . }").unwrap_err();
        match error {
            CompileError::Match(e) => assert!(e.index() > 0),
            CompileError::Eval(e) => panic!("expected a match failure, got {e}"),
        }
    }

    #[test]
    fn test_compile_is_deterministic() {
        let source = "Grammar { x = 'a'* -> { \"got \" xs } }";
        // Not a binding error: `xs` is undefined only at evaluation time of
        // the *compiled* program, not at compile time.
        assert_eq!(compile_source(source).unwrap(), compile_source(source).unwrap());
    }

    #[test]
    fn test_support_embed_matches_the_module_source() {
        assert_eq!(SUPPORT, include_str!("support.rs"));
    }
}
