//! @generated by metapeg --compile. Do not edit.
#![allow(missing_docs, unused_imports, unused_variables, clippy::needless_question_mark, clippy::too_many_lines)]

use crate::support::{action, and, bind, concat, indent, join, match_call_rule, match_list, match_object, match_rule, not, or, scope, splice, star, text, Pred, Rules};

pub fn install(rules: &mut Rules) {
    rules.insert("CodeGenerator.Namespace".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_object(Pred::Any)),
            bind("ys", star(match_rule("CodeGenerator.ast"))),
            action(|ev| Ok(ev.bind("namespace", ev.lookup("x")?, |ev| Ok(join(vec![
                ev.lookup("ys")?], "")))?))]))]));
    rules.insert("CodeGenerator.Rule".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_object(Pred::Any)),
            bind("y", match_rule("CodeGenerator.ast")),
            action(|ev| Ok(join(vec![
                text("rules.insert(\""),
                ev.lookup("namespace")?,
                text("."),
                ev.lookup("x")?,
                text("\", "),
                ev.lookup("y")?,
                text(");\n")], "")))]))]));
    rules.insert("CodeGenerator.Or".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("CodeGenerator.astList")),
            action(|ev| Ok(join(vec![
                text("or(vec!["),
                ev.lookup("x")?,
                text("])")], "")))]))]));
    rules.insert("CodeGenerator.Scope".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("CodeGenerator.ast")),
            action(|ev| Ok(join(vec![
                text("scope("),
                ev.lookup("x")?,
                text(")")], "")))]))]));
    rules.insert("CodeGenerator.And".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("CodeGenerator.astList")),
            action(|ev| Ok(join(vec![
                text("and(vec!["),
                ev.lookup("x")?,
                text("])")], "")))]))]));
    rules.insert("CodeGenerator.Bind".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_object(Pred::Any)),
            bind("y", match_rule("CodeGenerator.ast")),
            action(|ev| Ok(join(vec![
                text("bind("),
                ev.lookup("repr")?.call(vec![
                    ev.lookup("x")?])?,
                text(", "),
                ev.lookup("y")?,
                text(")")], "")))]))]));
    rules.insert("CodeGenerator.Star".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("CodeGenerator.ast")),
            action(|ev| Ok(join(vec![
                text("star("),
                ev.lookup("x")?,
                text(")")], "")))]))]));
    rules.insert("CodeGenerator.Not".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("CodeGenerator.ast")),
            action(|ev| Ok(join(vec![
                text("not("),
                ev.lookup("x")?,
                text(")")], "")))]))]));
    rules.insert("CodeGenerator.MatchCallRule".to_string(), or(vec![
        scope(and(vec![
            action(|ev| Ok(join(vec![
                text("match_call_rule(\""),
                ev.lookup("namespace")?,
                text("\")")], "")))]))]));
    rules.insert("CodeGenerator.MatchRule".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_object(Pred::Any)),
            action(|ev| Ok(join(vec![
                text("match_rule(\""),
                ev.lookup("namespace")?,
                text("."),
                ev.lookup("x")?,
                text("\")")], "")))]))]));
    rules.insert("CodeGenerator.MatchObject".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("CodeGenerator.ast")),
            action(|ev| Ok(join(vec![
                text("match_object("),
                ev.lookup("x")?,
                text(")")], "")))]))]));
    rules.insert("CodeGenerator.MatchList".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("CodeGenerator.ast")),
            action(|ev| Ok(join(vec![
                text("match_list("),
                ev.lookup("x")?,
                text(")")], "")))]))]));
    rules.insert("CodeGenerator.Any".to_string(), or(vec![
        scope(and(vec![
            action(|ev| Ok(text("Pred::Any")))]))]));
    rules.insert("CodeGenerator.Eq".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_object(Pred::Any)),
            action(|ev| Ok(join(vec![
                text("Pred::Eq("),
                ev.lookup("charrepr")?.call(vec![
                    ev.lookup("x")?])?,
                text(")")], "")))]))]));
    rules.insert("CodeGenerator.Range".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_object(Pred::Any)),
            bind("y", match_object(Pred::Any)),
            action(|ev| Ok(join(vec![
                text("Pred::Range("),
                ev.lookup("charrepr")?.call(vec![
                    ev.lookup("x")?])?,
                text(", "),
                ev.lookup("charrepr")?.call(vec![
                    ev.lookup("y")?])?,
                text(")")], "")))]))]));
    rules.insert("CodeGenerator.Action".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("CodeGenerator.ast")),
            action(|ev| Ok(join(vec![
                text("action(|ev| Ok("),
                ev.lookup("x")?,
                text("))")], "")))]))]));
    rules.insert("CodeGenerator.Set".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_object(Pred::Any)),
            bind("y", match_rule("CodeGenerator.ast")),
            bind("z", match_rule("CodeGenerator.ast")),
            action(|ev| Ok(join(vec![
                text("ev.bind("),
                ev.lookup("repr")?.call(vec![
                    ev.lookup("x")?])?,
                text(", "),
                ev.lookup("y")?,
                text(", |ev| Ok("),
                ev.lookup("z")?,
                text("))?")], "")))]))]));
    rules.insert("CodeGenerator.String".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_object(Pred::Any)),
            action(|ev| Ok(join(vec![
                text("text("),
                ev.lookup("repr")?.call(vec![
                    ev.lookup("x")?])?,
                text(")")], "")))]))]));
    rules.insert("CodeGenerator.List".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("CodeGenerator.astList")),
            action(|ev| Ok(join(vec![
                text("concat(vec!["),
                ev.lookup("x")?,
                text("])")], "")))]))]));
    rules.insert("CodeGenerator.ListItem".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_object(Pred::Any)),
            bind("y", match_rule("CodeGenerator.ast")),
            action(|ev| Ok(join(vec![
                text("splice("),
                ev.lookup("repr")?.call(vec![
                    ev.lookup("x")?])?,
                text(", "),
                ev.lookup("y")?,
                text(")?")], "")))]))]));
    rules.insert("CodeGenerator.Format".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("CodeGenerator.astList")),
            action(|ev| Ok(join(vec![
                text("join(vec!["),
                ev.lookup("x")?,
                text("], \"\")")], "")))]))]));
    rules.insert("CodeGenerator.Indent".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("CodeGenerator.ast")),
            action(|ev| Ok(join(vec![
                text("indent("),
                ev.lookup("x")?,
                text(", ev.lookup(\"indentprefix\")?)")], "")))]))]));
    rules.insert("CodeGenerator.Call".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("CodeGenerator.ast")),
            bind("y", match_rule("CodeGenerator.astList")),
            action(|ev| Ok(join(vec![
                ev.lookup("x")?,
                text(".call(vec!["),
                ev.lookup("y")?,
                text("])?")], "")))]))]));
    rules.insert("CodeGenerator.Lookup".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_object(Pred::Any)),
            action(|ev| Ok(join(vec![
                text("ev.lookup("),
                ev.lookup("repr")?.call(vec![
                    ev.lookup("x")?])?,
                text(")?")], "")))]))]));
    rules.insert("CodeGenerator.astList".to_string(), or(vec![
        scope(and(vec![
            bind("xs", star(match_rule("CodeGenerator.ast"))),
            action(|ev| Ok(join(vec![
                text("\n"),
                indent(join(vec![
                    ev.lookup("join")?.call(vec![
                        ev.lookup("xs")?,
                        text(",\n")])?], ""), ev.lookup("indentprefix")?)], "")))]))]));
    rules.insert("CodeGenerator.asts".to_string(), or(vec![
        scope(and(vec![
            bind("xs", star(match_rule("CodeGenerator.ast"))),
            not(match_object(Pred::Any)),
            action(|ev| Ok(join(vec![
                text("//! @generated by metapeg --compile. Do not edit.\n"),
                text("#![allow(missing_docs, unused_imports, unused_variables, clippy::needless_question_mark, clippy::too_many_lines)]\n"),
                text("\n"),
                text("use crate::support::{action, and, bind, concat, indent, join, match_call_rule, match_list, match_object, match_rule, not, or, scope, splice, star, text, Pred, Rules};\n"),
                text("\n"),
                text("pub fn install(rules: &mut Rules) {\n"),
                indent(join(vec![
                    ev.lookup("xs")?], ""), ev.lookup("indentprefix")?),
                text("}\n")], "")))]))]));
    rules.insert("CodeGenerator.ast".to_string(), or(vec![
        scope(and(vec![
            match_list(and(vec![
                bind("x", match_call_rule("CodeGenerator"))]))]))]));
}
