use crate::parser::{Parsed, Parser};

/// Run two parsers in order, yielding both values.
///
/// If either fails the whole sequence fails, and nothing is consumed.
pub fn sequence2<A, B>(a: Parser<A>, b: Parser<B>) -> Parser<(A, B)>
where
    A: 'static,
    B: 'static,
{
    let description = format!("{} {}", a.description(), b.description());
    Parser::new(description, move |cursor| {
        let first = a.parse(cursor)?;
        let second = b
            .parse(first.cursor)
            .map_err(|failure| failure.or_recovered(first.recovered.clone()))?;
        Ok(Parsed {
            value: (first.value, second.value),
            cursor: second.cursor,
            recovered: first.recovered,
        }
        .recovering(second.recovered))
    })
}

/// Run three parsers in order, yielding all values.
pub fn sequence3<A, B, C>(a: Parser<A>, b: Parser<B>, c: Parser<C>) -> Parser<(A, B, C)>
where
    A: 'static,
    B: 'static,
    C: 'static,
{
    sequence2(sequence2(a, b), c).map(|((a, b), c)| (a, b, c))
}

/// Run four parsers in order, yielding all values.
pub fn sequence4<A, B, C, D>(
    a: Parser<A>,
    b: Parser<B>,
    c: Parser<C>,
    d: Parser<D>,
) -> Parser<(A, B, C, D)>
where
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
{
    sequence2(sequence3(a, b, c), d).map(|((a, b, c), d)| (a, b, c, d))
}

/// Run any number of same-typed parsers in order.
pub fn sequence<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    let description = parsers
        .iter()
        .map(|p| p.description())
        .collect::<Vec<&str>>()
        .join(" ");
    Parser::new(description, move |cursor| {
        let mut parsed = Parsed::new(Vec::with_capacity(parsers.len()), cursor);

        for parser in &parsers {
            let next = parser
                .parse(parsed.cursor)
                .map_err(|failure| failure.or_recovered(parsed.recovered.clone()))?;
            parsed.value.push(next.value);
            parsed.cursor = next.cursor;
            parsed = parsed.recovering(next.recovered);
        }

        Ok(parsed)
    })
}

/// Run `first` then `second`, keeping only the value of `second`.
pub fn preceded<A, B>(first: Parser<A>, second: Parser<B>) -> Parser<B>
where
    A: 'static,
    B: 'static,
{
    sequence2(first, second).map(|(_, b)| b)
}

/// Match the keyword `literal`, then run `parser` for its value.
pub fn succeeded<T: 'static>(literal: &str, parser: Parser<T>) -> Parser<T> {
    let description = format!("{literal} {}", parser.description());
    preceded(Parser::of_string(literal, ()), parser).described(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::TokenCursor;
    use crate::error::ParseError;
    use rstest::rstest;

    fn word(w: &'static str) -> Parser<&'static str> {
        Parser::of_string(w, w)
    }

    #[test]
    fn pair() {
        let tokens = ["a", "b", "c"];
        let parsed = sequence2(word("a"), word("b"))
            .parse(TokenCursor::new(&tokens))
            .unwrap();
        assert_eq!(parsed.value, ("a", "b"));
        assert_eq!(parsed.cursor.position(), 2);
    }

    #[test]
    fn four() {
        let tokens = ["a", "b", "c", "d"];
        let value = sequence4(word("a"), word("b"), word("c"), word("d"))
            .parse_tokens(&tokens)
            .unwrap();
        assert_eq!(value, ("a", "b", "c", "d"));
    }

    #[rstest]
    #[case(vec!["x", "b", "c"], 0)]
    #[case(vec!["a", "x", "c"], 1)]
    #[case(vec!["a", "b", "x"], 2)]
    #[case(vec!["a", "b"], 2)]
    fn failure_leaks_nothing(#[case] tokens: Vec<&str>, #[case] offset: usize) {
        let parser = sequence3(word("a"), word("b"), word("c"));
        let failure = parser.parse(TokenCursor::new(&tokens)).unwrap_err();
        assert_eq!(failure.offset(), offset);

        let parsed = parser.optional().parse(TokenCursor::new(&tokens)).unwrap();
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.cursor.position(), 0);
    }

    #[test]
    fn n_ary() {
        let tokens = ["a", "b", "c"];
        let parser = sequence(vec![word("a"), word("b"), word("c")]);
        assert_eq!(parser.parse_tokens(&tokens).unwrap(), vec!["a", "b", "c"]);
        assert_eq!(parser.description(), "'a' 'b' 'c'");
    }

    #[test]
    fn keyword() {
        let tokens = ["--first", "2"];
        let int = Parser::single("Int", |t| {
            t.parse::<i64>()
                .map_err(|_| ParseError::could_not_interpret("Int", Some(t)))
        });
        let parser = succeeded("--first", int);
        assert_eq!(parser.parse_tokens(&tokens).unwrap(), 2);
        assert_eq!(parser.description(), "--first Int");

        let tokens = ["--first"];
        assert_eq!(
            parser.parse_tokens(&tokens).unwrap_err().into_error(),
            ParseError::could_not_interpret("Int", None)
        );
    }

    #[rstest]
    #[case(vec!["a", "x", "y"], 1, "'b'")]
    #[case(vec!["x", "y"], 0, "'c'")]
    fn failure_after_recovery(
        #[case] tokens: Vec<&str>,
        #[case] offset: usize,
        #[case] expected: &str,
    ) {
        // The optional pair gives up at `x`; a deeper give up is the better explanation.
        let parser = sequence2(sequence2(word("a"), word("b")).optional(), word("c"));
        let failure = parser.parse(TokenCursor::new(&tokens)).unwrap_err();
        assert_eq!(failure.offset(), offset);
        assert_matches!(
            failure.into_error(),
            ParseError::CouldNotInterpret { expected: e, .. } if e == expected
        );
    }

    #[test]
    fn recovered_failures_carry_through() {
        let tokens = ["a", "x", "c"];
        let parser = sequence(vec![
            sequence2(word("a"), word("b")).map(|(a, _)| a).fallback("-"),
            word("a"),
            Parser::succeed("c"),
        ]);
        let parsed = parser.parse(TokenCursor::new(&tokens)).unwrap();
        assert_eq!(parsed.value, vec!["-", "a", "c"]);
        assert_eq!(parsed.cursor.position(), 1);
        assert_eq!(parsed.recovered.unwrap().offset(), 1);
    }
}
