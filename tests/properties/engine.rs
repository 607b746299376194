use metapeg::support::{
    and, match_object, or, star, Matcher, Pred, Runtime, Rules, Stream, Value,
};
use proptest::prelude::*;

use crate::DEFAULT_NUMBER_OF_TEST_CASES;

fn chars(input: &str) -> Vec<Value> {
    input.chars().map(Value::Char).collect()
}

fn eq(c: char) -> Matcher {
    match_object(Pred::Eq(c))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(DEFAULT_NUMBER_OF_TEST_CASES))]

    /// Star is greedy and maximal: over k 'a's followed by a non-'a', it
    /// produces exactly k values.
    #[test]
    fn test_star_consumes_every_leading_repetition(k in 0usize..64) {
        let input = format!("{}b", "a".repeat(k));
        let rules = Rules::new();
        let mut stream = Stream::new(chars(&input));
        let action = star(eq('a')).run(&mut stream, &rules).unwrap();
        let value = action.eval(&Runtime::new()).unwrap();
        match value {
            Value::List(items) => prop_assert_eq!(items.borrow().len(), k),
            other => prop_assert!(false, "expected a list, got {}", other.repr()),
        }
    }

    /// The reported failure position is the furthest cursor reached across
    /// all alternatives: a prefix matcher over 'a's fails exactly at the
    /// first non-'a'.
    #[test]
    fn test_failure_position_is_the_deepest_reach(k in 0usize..64) {
        let input = format!("{}c", "a".repeat(k));
        let rules = Rules::new();
        let mut stream = Stream::new(chars(&input));
        let matcher = and(vec![star(eq('a')), eq('b')]);
        let error = matcher.run(&mut stream, &rules).unwrap_err();
        prop_assert_eq!(error.index(), k);
    }

    /// Ordered choice is left-biased: when both alternatives would match,
    /// the produced value equals what the first alone would produce.
    #[test]
    fn test_ordered_choice_prefers_the_first_alternative(c in proptest::char::range('a', 'z')) {
        let rules = Rules::new();
        let both = or(vec![eq(c), match_object(Pred::Any)]);
        let first_alone = eq(c);

        let run = |matcher: &Matcher| {
            let mut stream = Stream::new(chars(&c.to_string()));
            matcher
                .run(&mut stream, &rules)
                .unwrap()
                .eval(&Runtime::new())
                .unwrap()
        };
        prop_assert_eq!(run(&both), run(&first_alone));
    }

    /// Compiling a one-rule grammar registers exactly that rule, whatever
    /// the names involved.
    #[test]
    fn test_compile_registers_rules_under_their_names(
        namespace in "[A-Z][a-zA-Z0-9]{0,8}",
        rule in "[a-z][a-zA-Z0-9]{0,8}",
    ) {
        let source = format!("{namespace} {{ {rule} = . }}");
        let output = metapeg::compile_source(&source).unwrap();
        let needle = format!("rules.insert(\"{namespace}.{rule}\", or(vec![");
        prop_assert!(output.contains(&needle));
    }
}
