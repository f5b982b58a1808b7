use serde::{
	de::Error,
	Deserialize,
	Deserializer,
	Serialize,
	Serializer,
};

use crate::Rule;

/// The serialized form of a rule: the two template sources.
#[derive(Serialize, Deserialize)]
#[serde(rename = "Rule", deny_unknown_fields)]
struct RuleSource<'a> {
	#[serde(borrow)]
	before: std::borrow::Cow<'a, str>,
	#[serde(borrow)]
	after: std::borrow::Cow<'a, str>,
}

impl Serialize for Rule {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		RuleSource {
			before: self.before().source().into(),
			after: self.after().source().into(),
		}
		.serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for Rule {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let source = RuleSource::deserialize(deserializer)?;
		Rule::new(&source.before, &source.after).map_err(D::Error::custom)
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::let_assert;
	use serde_test::{assert_de_tokens_error, assert_ser_tokens, Token};

	#[test]
	fn test_serialize() {
		let_assert!(Ok(rule) = Rule::new("f($1$, $2$)", "f($2$, $1$)"));
		assert_ser_tokens(&rule, &[
			Token::Struct { name: "Rule", len: 2 },
			Token::Str("before"),
			Token::Str("f($1$, $2$)"),
			Token::Str("after"),
			Token::Str("f($2$, $1$)"),
			Token::StructEnd,
		]);
	}

	#[test]
	fn test_deserialize_invalid_template() {
		assert_de_tokens_error::<Rule>(
			&[
				Token::Struct { name: "Rule", len: 2 },
				Token::Str("before"),
				Token::Str("g(x)"),
				Token::Str("after"),
				Token::Str("h($1$)"),
				Token::StructEnd,
			],
			"No placeholder in before template",
		);
	}
}
