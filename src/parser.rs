//! @generated by metapeg --compile. Do not edit.
#![allow(missing_docs, unused_imports, unused_variables, clippy::needless_question_mark, clippy::too_many_lines)]

use crate::support::{action, and, bind, concat, indent, join, match_call_rule, match_list, match_object, match_rule, not, or, scope, splice, star, text, Pred, Rules};

pub fn install(rules: &mut Rules) {
    rules.insert("Parser.file".to_string(), or(vec![
        scope(and(vec![
            bind("xs", star(or(vec![
                scope(and(vec![
                    match_rule("Parser.space"),
                    match_rule("Parser.namespace")]))]))),
            match_rule("Parser.space"),
            not(match_object(Pred::Any)),
            action(|ev| Ok(ev.lookup("xs")?))]))]));
    rules.insert("Parser.namespace".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("Parser.name")),
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('{'))]),
            bind("ys", star(match_rule("Parser.rule"))),
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('}'))]),
            action(|ev| Ok(concat(vec![
                splice(0, text("Namespace"))?,
                splice(0, ev.lookup("x")?)?,
                splice(1, ev.lookup("ys")?)?])))]))]));
    rules.insert("Parser.rule".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("Parser.name")),
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('='))]),
            bind("y", match_rule("Parser.choice")),
            action(|ev| Ok(concat(vec![
                splice(0, text("Rule"))?,
                splice(0, ev.lookup("x")?)?,
                splice(0, ev.lookup("y")?)?])))]))]));
    rules.insert("Parser.choice".to_string(), or(vec![
        scope(and(vec![
            or(vec![
                or(vec![
                    scope(and(vec![
                        match_rule("Parser.space"),
                        and(vec![
                            match_object(Pred::Eq('|'))])]))]),
                and(vec![
                ])]),
            bind("x", match_rule("Parser.sequence")),
            bind("xs", star(or(vec![
                scope(and(vec![
                    match_rule("Parser.space"),
                    and(vec![
                        match_object(Pred::Eq('|'))]),
                    match_rule("Parser.sequence")]))]))),
            action(|ev| Ok(concat(vec![
                splice(0, text("Or"))?,
                splice(0, ev.lookup("x")?)?,
                splice(1, ev.lookup("xs")?)?])))]))]));
    rules.insert("Parser.sequence".to_string(), or(vec![
        scope(and(vec![
            bind("xs", star(match_rule("Parser.expr"))),
            bind("ys", match_rule("Parser.maybeAction")),
            action(|ev| Ok(concat(vec![
                splice(0, text("Scope"))?,
                splice(0, concat(vec![
                    splice(0, text("And"))?,
                    splice(1, ev.lookup("xs")?)?,
                    splice(1, ev.lookup("ys")?)?]))?])))]))]));
    rules.insert("Parser.expr".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("Parser.expr1")),
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq(':'))]),
            bind("y", match_rule("Parser.name")),
            action(|ev| Ok(concat(vec![
                splice(0, text("Bind"))?,
                splice(0, ev.lookup("y")?)?,
                splice(0, ev.lookup("x")?)?])))])),
        scope(and(vec![
            match_rule("Parser.expr1")]))]));
    rules.insert("Parser.expr1".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("Parser.expr2")),
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('*'))]),
            action(|ev| Ok(concat(vec![
                splice(0, text("Star"))?,
                splice(0, ev.lookup("x")?)?])))])),
        scope(and(vec![
            bind("x", match_rule("Parser.expr2")),
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('?'))]),
            action(|ev| Ok(concat(vec![
                splice(0, text("Or"))?,
                splice(0, ev.lookup("x")?)?,
                splice(0, concat(vec![
                    splice(0, text("And"))?]))?])))])),
        scope(and(vec![
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('!'))]),
            bind("x", match_rule("Parser.expr2")),
            action(|ev| Ok(concat(vec![
                splice(0, text("Not"))?,
                splice(0, ev.lookup("x")?)?])))])),
        scope(and(vec![
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('%'))]),
            action(|ev| Ok(concat(vec![
                splice(0, text("MatchCallRule"))?])))])),
        scope(and(vec![
            match_rule("Parser.expr2")]))]));
    rules.insert("Parser.expr2".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("Parser.name")),
            not(or(vec![
                scope(and(vec![
                    match_rule("Parser.space"),
                    and(vec![
                        match_object(Pred::Eq('='))])]))])),
            action(|ev| Ok(concat(vec![
                splice(0, text("MatchRule"))?,
                splice(0, ev.lookup("x")?)?])))])),
        scope(and(vec![
            match_rule("Parser.space"),
            bind("x", match_rule("Parser.char")),
            and(vec![
                match_object(Pred::Eq('-'))]),
            bind("y", match_rule("Parser.char")),
            action(|ev| Ok(concat(vec![
                splice(0, text("MatchObject"))?,
                splice(0, concat(vec![
                    splice(0, text("Range"))?,
                    splice(0, ev.lookup("x")?)?,
                    splice(0, ev.lookup("y")?)?]))?])))])),
        scope(and(vec![
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('\''))]),
            bind("xs", star(or(vec![
                scope(and(vec![
                    not(and(vec![
                        match_object(Pred::Eq('\''))])),
                    match_rule("Parser.matchChar")]))]))),
            and(vec![
                match_object(Pred::Eq('\''))]),
            action(|ev| Ok(concat(vec![
                splice(0, text("And"))?,
                splice(1, ev.lookup("xs")?)?])))])),
        scope(and(vec![
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('.'))]),
            action(|ev| Ok(concat(vec![
                splice(0, text("MatchObject"))?,
                splice(0, concat(vec![
                    splice(0, text("Any"))?]))?])))])),
        scope(and(vec![
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('('))]),
            bind("x", match_rule("Parser.choice")),
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq(')'))]),
            action(|ev| Ok(ev.lookup("x")?))])),
        scope(and(vec![
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('['))]),
            bind("xs", star(match_rule("Parser.expr"))),
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq(']'))]),
            action(|ev| Ok(concat(vec![
                splice(0, text("MatchList"))?,
                splice(0, concat(vec![
                    splice(0, text("And"))?,
                    splice(1, ev.lookup("xs")?)?]))?])))]))]));
    rules.insert("Parser.matchChar".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("Parser.innerChar")),
            action(|ev| Ok(concat(vec![
                splice(0, text("MatchObject"))?,
                splice(0, concat(vec![
                    splice(0, text("Eq"))?,
                    splice(0, ev.lookup("x")?)?]))?])))]))]));
    rules.insert("Parser.maybeAction".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("Parser.actionExpr")),
            action(|ev| Ok(concat(vec![
                splice(0, concat(vec![
                    splice(0, text("Action"))?,
                    splice(0, ev.lookup("x")?)?]))?])))])),
        scope(and(vec![
            action(|ev| Ok(concat(vec![
            ])))]))]));
    rules.insert("Parser.actionExpr".to_string(), or(vec![
        scope(and(vec![
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('-')),
                match_object(Pred::Eq('>'))]),
            bind("x", match_rule("Parser.hostExpr")),
            bind("y", or(vec![
                scope(and(vec![
                    match_rule("Parser.space"),
                    and(vec![
                        match_object(Pred::Eq(':'))]),
                    match_rule("Parser.name")])),
                scope(and(vec![
                    action(|ev| Ok(text("")))]))])),
            bind("z", match_rule("Parser.actionExpr")),
            action(|ev| Ok(concat(vec![
                splice(0, text("Set"))?,
                splice(0, ev.lookup("y")?)?,
                splice(0, ev.lookup("x")?)?,
                splice(0, ev.lookup("z")?)?])))])),
        scope(and(vec![
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('-')),
                match_object(Pred::Eq('>'))]),
            match_rule("Parser.hostExpr")]))]));
    rules.insert("Parser.hostExpr".to_string(), or(vec![
        scope(and(vec![
            match_rule("Parser.space"),
            bind("x", match_rule("Parser.string")),
            action(|ev| Ok(concat(vec![
                splice(0, text("String"))?,
                splice(0, ev.lookup("x")?)?])))])),
        scope(and(vec![
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('['))]),
            bind("xs", star(match_rule("Parser.hostListItem"))),
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq(']'))]),
            action(|ev| Ok(concat(vec![
                splice(0, text("List"))?,
                splice(1, ev.lookup("xs")?)?])))])),
        scope(and(vec![
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('{'))]),
            bind("xs", star(match_rule("Parser.formatExpr"))),
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('}'))]),
            action(|ev| Ok(concat(vec![
                splice(0, text("Format"))?,
                splice(1, ev.lookup("xs")?)?])))])),
        scope(and(vec![
            bind("x", match_rule("Parser.var")),
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('('))]),
            bind("ys", star(match_rule("Parser.hostExpr"))),
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq(')'))]),
            action(|ev| Ok(concat(vec![
                splice(0, text("Call"))?,
                splice(0, ev.lookup("x")?)?,
                splice(1, ev.lookup("ys")?)?])))])),
        scope(and(vec![
            match_rule("Parser.var")]))]));
    rules.insert("Parser.hostListItem".to_string(), or(vec![
        scope(and(vec![
            match_rule("Parser.space"),
            bind("ys", star(and(vec![
                match_object(Pred::Eq('~'))]))),
            bind("x", match_rule("Parser.hostExpr")),
            action(|ev| Ok(concat(vec![
                splice(0, text("ListItem"))?,
                splice(0, ev.lookup("len")?.call(vec![
                    ev.lookup("ys")?])?)?,
                splice(0, ev.lookup("x")?)?])))]))]));
    rules.insert("Parser.formatExpr".to_string(), or(vec![
        scope(and(vec![
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('>'))]),
            bind("xs", star(match_rule("Parser.formatExpr"))),
            match_rule("Parser.space"),
            and(vec![
                match_object(Pred::Eq('<'))]),
            action(|ev| Ok(concat(vec![
                splice(0, text("Indent"))?,
                splice(0, concat(vec![
                    splice(0, text("Format"))?,
                    splice(1, ev.lookup("xs")?)?]))?])))])),
        scope(and(vec![
            match_rule("Parser.hostExpr")]))]));
    rules.insert("Parser.var".to_string(), or(vec![
        scope(and(vec![
            bind("x", match_rule("Parser.name")),
            not(or(vec![
                scope(and(vec![
                    match_rule("Parser.space"),
                    and(vec![
                        match_object(Pred::Eq('='))])]))])),
            action(|ev| Ok(concat(vec![
                splice(0, text("Lookup"))?,
                splice(0, ev.lookup("x")?)?])))]))]));
    rules.insert("Parser.string".to_string(), or(vec![
        scope(and(vec![
            and(vec![
                match_object(Pred::Eq('"'))]),
            bind("xs", star(or(vec![
                scope(and(vec![
                    not(and(vec![
                        match_object(Pred::Eq('"'))])),
                    match_rule("Parser.innerChar")]))]))),
            and(vec![
                match_object(Pred::Eq('"'))]),
            action(|ev| Ok(join(vec![
                ev.lookup("xs")?], "")))]))]));
    rules.insert("Parser.char".to_string(), or(vec![
        scope(and(vec![
            and(vec![
                match_object(Pred::Eq('\''))]),
            not(and(vec![
                match_object(Pred::Eq('\''))])),
            bind("x", match_rule("Parser.innerChar")),
            and(vec![
                match_object(Pred::Eq('\''))]),
            action(|ev| Ok(ev.lookup("x")?))]))]));
    rules.insert("Parser.innerChar".to_string(), or(vec![
        scope(and(vec![
            and(vec![
                match_object(Pred::Eq('\\'))]),
            match_rule("Parser.escape")])),
        scope(and(vec![
            match_object(Pred::Any)]))]));
    rules.insert("Parser.escape".to_string(), or(vec![
        scope(and(vec![
            and(vec![
                match_object(Pred::Eq('\\'))]),
            action(|ev| Ok(text("\\")))])),
        scope(and(vec![
            and(vec![
                match_object(Pred::Eq('\''))]),
            action(|ev| Ok(text("'")))])),
        scope(and(vec![
            and(vec![
                match_object(Pred::Eq('"'))]),
            action(|ev| Ok(text("\"")))])),
        scope(and(vec![
            and(vec![
                match_object(Pred::Eq('n'))]),
            action(|ev| Ok(text("\n")))]))]));
    rules.insert("Parser.name".to_string(), or(vec![
        scope(and(vec![
            match_rule("Parser.space"),
            bind("x", match_rule("Parser.nameStart")),
            bind("xs", star(match_rule("Parser.nameChar"))),
            action(|ev| Ok(join(vec![
                ev.lookup("x")?,
                ev.lookup("xs")?], "")))]))]));
    rules.insert("Parser.nameStart".to_string(), or(vec![
        scope(and(vec![
            match_object(Pred::Range('a', 'z'))])),
        scope(and(vec![
            match_object(Pred::Range('A', 'Z'))]))]));
    rules.insert("Parser.nameChar".to_string(), or(vec![
        scope(and(vec![
            match_object(Pred::Range('a', 'z'))])),
        scope(and(vec![
            match_object(Pred::Range('A', 'Z'))])),
        scope(and(vec![
            match_object(Pred::Range('0', '9'))]))]));
    rules.insert("Parser.space".to_string(), or(vec![
        scope(and(vec![
            star(or(vec![
                scope(and(vec![
                    and(vec![
                        match_object(Pred::Eq(' '))])])),
                scope(and(vec![
                    and(vec![
                        match_object(Pred::Eq('\n'))])]))]))]))]));
}
