//! Pure helpers for reading column-bearing literal arguments out of call
//! expressions. Kept free of interpreter state so they can't accidentally
//! depend on binding/scope context — these only ever look at the AST.

use crate::source::ir::{Expr, Keyword};

/// The first matching keyword argument's value, among `names` in order.
pub fn first_keyword<'a>(keywords: &'a [Keyword], names: &[&str]) -> Option<&'a Expr> {
    names
        .iter()
        .find_map(|n| keywords.iter().find(|k| k.name.as_deref() == Some(n)))
        .map(|k| &k.value)
}

/// Read a literal string list from either the first positional argument or
/// one of the given keyword names — covers both `drop([...])` (dialect B
/// positional) and `drop(columns=[...])` (dialect A keyword) call shapes.
pub fn str_list_arg<'a>(args: &'a [Expr], keywords: &'a [Keyword], kw_names: &[&str]) -> Option<Vec<&'a str>> {
    if let Some(Expr::List(_) | Expr::Tuple(_)) = args.first() {
        if let Some(list) = args.first().and_then(Expr::as_str_list) {
            return Some(list);
        }
    }
    first_keyword(keywords, kw_names).and_then(Expr::as_str_list)
}

/// Read a `{"old": "new", ...}` dict literal's string-to-string pairs.
/// Non-literal keys or values are dropped rather than rejecting the whole
/// mapping — matching the extractor's tolerance rule.
pub fn dict_rename_mapping(expr: &Expr) -> Vec<(String, String)> {
    let Expr::Dict(pairs) = expr else {
        return Vec::new();
    };
    pairs
        .iter()
        .filter_map(|(k, v)| {
            let key = k.as_ref()?.as_str_literal()?;
            let value = v.as_str_literal()?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Keyword argument names from an `assign(k=v, ...)` call — the new
/// column names it introduces, regardless of what `v` evaluates to.
pub fn keyword_names(keywords: &[Keyword]) -> Vec<String> {
    keywords.iter().filter_map(|k| k.name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(name: &str, value: Expr) -> Keyword {
        Keyword { name: Some(name.to_string()), value }
    }

    #[test]
    fn str_list_arg_prefers_positional_list() {
        let args = vec![Expr::List(vec![Expr::Str("a".into())])];
        let got = str_list_arg(&args, &[], &["columns"]);
        assert_eq!(got, Some(vec!["a"]));
    }

    #[test]
    fn str_list_arg_falls_back_to_keyword() {
        let keywords = vec![kw("columns", Expr::List(vec![Expr::Str("b".into())]))];
        let got = str_list_arg(&[], &keywords, &["columns"]);
        assert_eq!(got, Some(vec!["b"]));
    }

    #[test]
    fn dict_rename_mapping_skips_non_literal_pairs() {
        let dict = Expr::Dict(vec![
            (Some(Expr::Str("a".into())), Expr::Str("b".into())),
            (Some(Expr::Other), Expr::Str("c".into())),
        ]);
        assert_eq!(dict_rename_mapping(&dict), vec![("a".to_string(), "b".to_string())]);
    }
}
