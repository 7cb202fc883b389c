//! Attribute argument extraction.
//!
//! Attribute options arrive in two shapes: named arguments
//! (`#[Range(min: 1, max: 5)]`) or a single positional literal array
//! (`#[Range(['min' => 1, 'max' => 5])]`). [`ArgShape`] unifies both so
//! rules accumulate option keys with one routine.

use crate::ast::{Arg, ArrayItem, Attribute, Expr};

/// One option-carrying argument of an attribute.
#[derive(Debug, Clone, Copy)]
pub enum ArgShape<'a> {
    /// A named argument.
    Named(&'a Arg),
    /// The items of a positional literal array.
    Positional(&'a [ArrayItem]),
}

/// An option key found in an attribute, with the line it was written on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionKey<'a> {
    /// Option name.
    pub key: &'a str,
    /// Line of the argument or array item.
    pub line: usize,
}

impl<'a> ArgShape<'a> {
    /// Option keys carried by this shape.
    ///
    /// Array items whose key is not a string literal are skipped.
    #[must_use]
    pub fn keys(&self) -> Vec<OptionKey<'a>> {
        match *self {
            Self::Named(arg) => arg
                .name
                .as_deref()
                .map(|key| OptionKey {
                    key,
                    line: arg.line,
                })
                .into_iter()
                .collect(),
            Self::Positional(items) => items
                .iter()
                .filter_map(|item| {
                    item.string_key().map(|key| OptionKey {
                        key,
                        line: item.line,
                    })
                })
                .collect(),
        }
    }
}

/// Splits an attribute's arguments into option-carrying shapes.
///
/// Positional arguments that are not literal arrays carry no option keys
/// and are dropped.
pub fn shapes(attr: &Attribute) -> impl Iterator<Item = ArgShape<'_>> {
    attr.args.iter().filter_map(|arg| {
        if arg.is_named() {
            return Some(ArgShape::Named(arg));
        }
        match &arg.value {
            Expr::Array { items, .. } => Some(ArgShape::Positional(items.as_slice())),
            _ => None,
        }
    })
}

/// All option keys of an attribute in declaration order.
#[must_use]
pub fn option_keys(attr: &Attribute) -> Vec<OptionKey<'_>> {
    shapes(attr).flat_map(|shape| shape.keys()).collect()
}

/// Finds the item with string-literal key `key` in a literal array.
#[must_use]
pub fn find_key<'a>(items: &'a [ArrayItem], key: &str) -> Option<&'a ArrayItem> {
    items.iter().find(|item| item.string_key() == Some(key))
}

/// Picks the first usable line from a priority chain.
///
/// Hosts report `0` (or nothing) when a position is unknown; those entries
/// are skipped. Returns `0` when no candidate is usable.
#[must_use]
pub fn best_line<I>(candidates: I) -> usize
where
    I: IntoIterator<Item = Option<usize>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|line| *line > 0)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_positional_shapes_yield_keys() {
        let named = Attribute::new("Assert\\Range", 10)
            .with_arg(Arg::named("min", Expr::int(1, 10)))
            .with_arg(Arg::named("maxMessage", Expr::string("too big", 11)));
        let keys: Vec<&str> = option_keys(&named).iter().map(|k| k.key).collect();
        assert_eq!(keys, vec!["min", "maxMessage"]);

        let positional = Attribute::new("Assert\\Range", 20).with_arg(Arg::positional(Expr::array(
            vec![
                ArrayItem::keyed("min", Expr::int(1, 21)),
                ArrayItem {
                    key: None,
                    value: Expr::int(5, 22),
                    line: 22,
                },
                ArrayItem::keyed("max", Expr::int(9, 23)),
            ],
            20,
        )));
        let keys = option_keys(&positional);
        assert_eq!(
            keys,
            vec![
                OptionKey { key: "min", line: 21 },
                OptionKey { key: "max", line: 23 },
            ]
        );
    }

    #[test]
    fn positional_scalars_are_ignored() {
        let attr = Attribute::new("Column", 3).with_arg(Arg::positional(Expr::string("name", 3)));
        assert_eq!(shapes(&attr).count(), 0);
    }

    #[test]
    fn find_key_requires_string_literal_key() {
        let items = vec![
            ArrayItem::keyed("default", Expr::int(0, 4)),
            ArrayItem::keyed("comment", Expr::string("Created at", 4)),
        ];
        assert!(find_key(&items, "comment").is_some());
        assert!(find_key(&items, "unsigned").is_none());
    }

    #[test]
    fn best_line_skips_unknown_positions() {
        assert_eq!(best_line([None, Some(0), Some(14), Some(9)]), 14);
        assert_eq!(best_line([None, Some(0)]), 0);
    }
}
