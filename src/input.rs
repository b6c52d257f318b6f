//! Strict parsers for the three interactive inputs.
//!
//! The node list accepts a bracketed (`[1, 2]`) or parenthesised (`(1, 2)`)
//! sequence of signed integers. Nothing is ever evaluated.

use log::warn;

use crate::error::GraphError;

const NODE_LIST: &str = "node list";
const CENTRAL: &str = "central node";
const ALPHA: &str = "alpha";

/// Parse `[x1, x2, ...]` into node ids, preserving order and duplicates.
pub fn parse_node_list(text: &str) -> Result<Vec<i64>, GraphError> {
	let trimmed = text.trim();
	let inner = strip_delimiters(trimmed).ok_or_else(|| {
		warn!("rejected node list {trimmed:?}");
		GraphError::parse(NODE_LIST, "expected a list like [1, 2, 3]", text)
	})?;

	let mut items: Vec<&str> = inner.split(',').map(str::trim).collect();
	// A single trailing comma is allowed: `[1, 2,]` and `(5,)`.
	if items.len() > 1 && items[items.len() - 1].is_empty() && !items[items.len() - 2].is_empty() {
		items.pop();
	}
	if items.len() == 1 && items[0].is_empty() {
		return Ok(Vec::new());
	}

	items
		.into_iter()
		.map(|item| {
			if item.is_empty() {
				return Err(GraphError::parse(NODE_LIST, "empty element", text));
			}
			item.parse::<i64>().map_err(|e| {
				warn!("rejected node list element {item:?}: {e}");
				GraphError::parse(NODE_LIST, format!("{item:?} is not an integer"), text)
			})
		})
		.collect()
}

/// Parse a single integer central node id.
pub fn parse_central(text: &str) -> Result<i64, GraphError> {
	text.trim()
		.parse::<i64>()
		.map_err(|e| GraphError::parse(CENTRAL, e.to_string(), text))
}

/// Parse the strength decay parameter. Range checks happen in [`crate::metrics`].
pub fn parse_alpha(text: &str) -> Result<f64, GraphError> {
	text.trim()
		.parse::<f64>()
		.map_err(|e| GraphError::parse(ALPHA, e.to_string(), text))
}

fn strip_delimiters(text: &str) -> Option<&str> {
	text.strip_prefix('[')
		.and_then(|rest| rest.strip_suffix(']'))
		.or_else(|| text.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')))
		.filter(|inner| !inner.contains(['[', ']', '(', ')']))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_bracketed_and_tuple_lists() {
		assert_eq!(parse_node_list("[1, 2, 3]").unwrap(), vec![1, 2, 3]);
		assert_eq!(parse_node_list("  [ -4,7 ,  7 ] ").unwrap(), vec![-4, 7, 7]);
		assert_eq!(parse_node_list("(5,)").unwrap(), vec![5]);
		assert_eq!(parse_node_list("[1, 2,]").unwrap(), vec![1, 2]);
		assert!(parse_node_list("[]").unwrap().is_empty());
		assert!(parse_node_list("[  ]").unwrap().is_empty());
	}

	#[test]
	fn rejects_anything_that_is_not_an_integer_literal_list() {
		for bad in [
			"1, 2, 3",
			"[1, 2",
			"[1.5, 2]",
			"[a, b]",
			"[1,,2]",
			"[,]",
			"[[1], 2]",
			"[__import__('os')]",
			"[99999999999999999999]",
			"",
		] {
			let err = parse_node_list(bad).unwrap_err();
			assert!(
				matches!(err, GraphError::InputParse { field: "node list", .. }),
				"{bad:?} gave {err:?}"
			);
		}
	}

	#[test]
	fn parses_central_and_alpha() {
		assert_eq!(parse_central(" 42 ").unwrap(), 42);
		assert_eq!(parse_central("-3").unwrap(), -3);
		assert!(parse_central("2.0").is_err());
		assert_eq!(parse_alpha("0.25").unwrap(), 0.25);
		assert_eq!(parse_alpha("-1").unwrap(), -1.0);
		assert!(matches!(
			parse_alpha("fast"),
			Err(GraphError::InputParse { field: "alpha", .. })
		));
	}
}
