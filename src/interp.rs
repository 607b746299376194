//! Run compiled grammars in-process.
//!
//! The code generator emits Rust source, which is the right artifact for a
//! build step but useless when a grammar should run right away (tests,
//! exploratory tooling). This module instead builds runnable [`Matcher`]
//! trees straight from a parsed grammar AST, interpreting semantic-action
//! expressions on the fly. Semantics match the generated code exactly: both
//! are renderings of the same AST.

use std::error::Error;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::support::{
    action, and, bind, concat, indent, join, match_call_rule, match_list, match_object,
    match_rule, not, or, scope, splice, star, Eval, EvalError, Matcher, Pred, Rules, Value,
};

/// A structurally invalid grammar AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError(String);

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed grammar AST: {}", self.0)
    }
}

impl Error for LoadError {}

fn malformed<T>(what: &str, node: &Value) -> Result<T, LoadError> {
    Err(LoadError(format!("expected {what}, got {}", node.repr())))
}

fn items_of(node: &Value, what: &str) -> Result<Vec<Value>, LoadError> {
    match node {
        Value::List(items) => Ok(items.borrow().clone()),
        other => malformed(what, other),
    }
}

fn str_of(node: &Value, what: &str) -> Result<String, LoadError> {
    match node {
        Value::Str(s) => Ok(s.clone()),
        other => malformed(what, other),
    }
}

fn char_of(node: &Value) -> Result<char, LoadError> {
    node.as_char()
        .ok_or_else(|| LoadError(format!("expected a character, got {}", node.repr())))
}

fn int_of(node: &Value) -> Result<i64, LoadError> {
    match node {
        Value::Int(i) => Ok(*i),
        other => malformed("an integer", other),
    }
}

/// Install every namespace of a parsed grammar file into `rules`.
///
/// `ast` is the value the `Parser.file` rule produces: a list of tagged
/// `Namespace` nodes, each holding its name and `Rule` nodes.
///
/// # Errors
///
/// Fails if the AST is not shaped like a grammar file.
pub fn install(ast: &Value, rules: &mut Rules) -> Result<(), LoadError> {
    for namespace in items_of(ast, "a grammar file")? {
        let node = items_of(&namespace, "a namespace node")?;
        let (name, body) = match node.as_slice() {
            [head, name, body @ ..] if *head == Value::from("Namespace") => {
                (str_of(name, "a namespace name")?, body)
            }
            _ => return malformed("a Namespace node", &namespace),
        };
        debug!("installing namespace: {name}");
        for rule in body {
            let node = items_of(rule, "a rule node")?;
            match node.as_slice() {
                [head, rule_name, matcher] if *head == Value::from("Rule") => {
                    let rule_name = str_of(rule_name, "a rule name")?;
                    let matcher = load_matcher(matcher, &name)?;
                    rules.insert(format!("{name}.{rule_name}"), matcher);
                }
                _ => return malformed("a Rule node", rule),
            }
        }
    }
    Ok(())
}

fn load_all(operands: &[Value], namespace: &str) -> Result<Vec<Matcher>, LoadError> {
    operands
        .iter()
        .map(|operand| load_matcher(operand, namespace))
        .collect()
}

fn load_matcher(node: &Value, namespace: &str) -> Result<Matcher, LoadError> {
    let items = items_of(node, "a matcher node")?;
    let Some((head, operands)) = items.split_first() else {
        return malformed("a tagged matcher node", node);
    };
    let tag = str_of(head, "a matcher tag")?;
    match (tag.as_str(), operands) {
        ("Or", _) => Ok(or(load_all(operands, namespace)?)),
        ("And", _) => Ok(and(load_all(operands, namespace)?)),
        ("Scope", [inner]) => Ok(scope(load_matcher(inner, namespace)?)),
        ("Star", [inner]) => Ok(star(load_matcher(inner, namespace)?)),
        ("Not", [inner]) => Ok(not(load_matcher(inner, namespace)?)),
        ("Bind", [name, inner]) => Ok(bind(
            &str_of(name, "a binding name")?,
            load_matcher(inner, namespace)?,
        )),
        ("MatchObject", [pred]) => Ok(match_object(load_pred(pred)?)),
        ("MatchList", [inner]) => Ok(match_list(load_matcher(inner, namespace)?)),
        ("MatchRule", [name]) => Ok(match_rule(&format!(
            "{namespace}.{}",
            str_of(name, "a rule name")?
        ))),
        ("MatchCallRule", []) => Ok(match_call_rule(namespace)),
        ("Action", [body]) => {
            let expr = Rc::new(load_expr(body)?);
            Ok(action(move |ev| expr.eval(ev)))
        }
        _ => malformed("a known matcher node", node),
    }
}

fn load_pred(node: &Value) -> Result<Pred, LoadError> {
    let items = items_of(node, "a predicate node")?;
    let Some((head, operands)) = items.split_first() else {
        return malformed("a tagged predicate node", node);
    };
    let tag = str_of(head, "a predicate tag")?;
    match (tag.as_str(), operands) {
        ("Any", []) => Ok(Pred::Any),
        ("Eq", [c]) => Ok(Pred::Eq(char_of(c)?)),
        ("Range", [low, high]) => Ok(Pred::Range(char_of(low)?, char_of(high)?)),
        _ => malformed("a known predicate node", node),
    }
}

/// A semantic-action expression, pre-validated at load time so evaluation
/// only ever fails for value-level reasons.
#[derive(Debug, Clone)]
enum Expr {
    Text(String),
    List(Vec<(i64, Expr)>),
    Format(Vec<Expr>),
    Indent(Box<Expr>),
    Call(Box<Expr>, Vec<Expr>),
    Lookup(String),
    Set(String, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self, ev: &Eval) -> Result<Value, EvalError> {
        match self {
            Self::Text(s) => Ok(Value::from(s.as_str())),
            Self::List(items) => {
                let mut spliced = Vec::new();
                for (depth, expr) in items {
                    spliced.push(splice(*depth, expr.eval(ev)?)?);
                }
                Ok(concat(spliced))
            }
            Self::Format(parts) => {
                let values = parts
                    .iter()
                    .map(|part| part.eval(ev))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(join(values, ""))
            }
            Self::Indent(inner) => Ok(indent(inner.eval(ev)?, ev.lookup("indentprefix")?)),
            Self::Call(callee, args) => {
                let callee = callee.eval(ev)?;
                let args = args
                    .iter()
                    .map(|arg| arg.eval(ev))
                    .collect::<Result<Vec<_>, _>>()?;
                callee.call(args)
            }
            Self::Lookup(name) => ev.lookup(name),
            Self::Set(name, value, body) => {
                let value = value.eval(ev)?;
                ev.bind(name, value, |ev| body.eval(ev))
            }
        }
    }
}

fn load_exprs(operands: &[Value]) -> Result<Vec<Expr>, LoadError> {
    operands.iter().map(load_expr).collect()
}

fn load_expr(node: &Value) -> Result<Expr, LoadError> {
    let items = items_of(node, "an action expression")?;
    let Some((head, operands)) = items.split_first() else {
        return malformed("a tagged action expression", node);
    };
    let tag = str_of(head, "an action expression tag")?;
    match (tag.as_str(), operands) {
        ("String", [s]) => Ok(Expr::Text(str_of(s, "string contents")?)),
        ("List", _) => {
            let items = operands
                .iter()
                .map(|item| {
                    let parts = items_of(item, "a list item")?;
                    match parts.as_slice() {
                        [head, depth, expr] if *head == Value::from("ListItem") => {
                            Ok((int_of(depth)?, load_expr(expr)?))
                        }
                        _ => malformed("a ListItem node", item),
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::List(items))
        }
        ("Format", _) => Ok(Expr::Format(load_exprs(operands)?)),
        ("Indent", [inner]) => Ok(Expr::Indent(Box::new(load_expr(inner)?))),
        ("Call", [callee, args @ ..]) => Ok(Expr::Call(
            Box::new(load_expr(callee)?),
            load_exprs(args)?,
        )),
        ("Lookup", [name]) => Ok(Expr::Lookup(str_of(name, "a lookup name")?)),
        ("Set", [name, value, body]) => Ok(Expr::Set(
            str_of(name, "a binding name")?,
            Box::new(load_expr(value)?),
            Box::new(load_expr(body)?),
        )),
        _ => malformed("a known action expression", node),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parse_source;
    use crate::support::{Runtime, Stream};

    fn load(grammar: &str) -> Rules {
        let ast = parse_source(grammar).expect("test grammar must parse");
        let mut rules = Rules::new();
        install(&ast, &mut rules).expect("test grammar must load");
        rules
    }

    fn run(rules: &Rules, rule: &str, items: Vec<Value>) -> Result<Value, String> {
        let mut stream = Stream::new(items);
        let action = rules[rule]
            .run(&mut stream, rules)
            .map_err(|e| e.message().to_owned())?;
        action.eval(&Runtime::new()).map_err(|e| e.to_string())
    }

    fn chars(input: &str) -> Vec<Value> {
        input.chars().map(Value::Char).collect()
    }

    #[test]
    fn test_range_grammar_yields_the_matched_char() {
        let rules = load("Grammar { x = 'a'-'c' }");
        assert_eq!(run(&rules, "Grammar.x", chars("b")).unwrap(), Value::Char('b'));
    }

    #[test]
    fn test_call_rule_falls_back_to_any_on_unknown_tag() {
        // `%` tries to dispatch on "foo"; there is no Grammar.foo, so the
        // ordered choice falls through to `.`, which consumes the string.
        let rules = load("Grammar { x = % | . }");
        let value = run(&rules, "Grammar.x", vec![Value::from("foo")]).unwrap();
        assert_eq!(value, Value::from("foo"));
    }

    #[test]
    fn test_call_rule_dispatches_on_known_tag() {
        let rules = load("Grammar { x = % | . greet = . -> \"hi\" }");
        let value = run(
            &rules,
            "Grammar.x",
            vec![Value::from("greet"), Value::from("payload")],
        )
        .unwrap();
        assert_eq!(value, Value::from("hi"));
    }

    #[test]
    fn test_list_pattern_descends_and_advances() {
        let rules = load("Grammar { list = [ 'a' 'b' ] }");
        let items = vec![Value::from(vec![Value::Char('a'), Value::Char('b')])];
        let mut stream = Stream::new(items);
        rules["Grammar.list"].run(&mut stream, &rules).unwrap();
        // The outer cursor sits past the single list item.
        assert!(stream.match_object(&Pred::Any).is_err());
    }

    #[test]
    fn test_format_action_reorders_bindings() {
        let rules = load("Grammar { x = .:a .:b -> { b a } }");
        assert_eq!(run(&rules, "Grammar.x", chars("xy")).unwrap(), Value::from("yx"));
    }

    #[test]
    fn test_splice_action_flattens_star_results() {
        let rules = load("Grammar { x = .*:xs -> [~xs \"end\"] }");
        let value = run(&rules, "Grammar.x", chars("ab")).unwrap();
        assert_eq!(
            value,
            Value::from(vec![
                Value::Char('a'),
                Value::Char('b'),
                Value::from("end"),
            ])
        );
    }

    #[test]
    fn test_set_action_threads_runtime_bindings() {
        let rules = load("Grammar { x = . -> \"v\":tag -> { tag tag } }");
        assert_eq!(run(&rules, "Grammar.x", chars("q")).unwrap(), Value::from("vv"));
    }

    #[test]
    fn test_builtin_calls_in_actions() {
        let rules = load("Grammar { x = .*:xs -> { repr(len(xs)) } }");
        assert_eq!(run(&rules, "Grammar.x", chars("abc")).unwrap(), Value::from("3"));
    }

    #[test]
    fn test_install_rejects_non_grammar_asts() {
        let mut rules = Rules::new();
        let bogus = Value::from(vec![Value::from(vec![Value::from("Rule")])]);
        assert!(install(&bogus, &mut rules).is_err());
    }

    #[test]
    fn test_load_rejects_unknown_matcher_tags() {
        let mut rules = Rules::new();
        let bogus = Value::from(vec![Value::from(vec![
            Value::from("Namespace"),
            Value::from("G"),
            Value::from(vec![
                Value::from("Rule"),
                Value::from("x"),
                Value::from(vec![Value::from("Wibble")]),
            ]),
        ])]);
        let error = install(&bogus, &mut rules).unwrap_err();
        assert!(error.to_string().contains("malformed grammar AST"));
    }
}
