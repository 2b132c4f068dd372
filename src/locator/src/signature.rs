use std::fmt::{Display, Formatter};

/// How a signature string is compared against a method's literals.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum StringMatch {
    /// The string occurs somewhere inside a literal.
    #[default]
    Contains,
    Equals,
}

impl StringMatch {
    pub fn matches(self, literal: &str, wanted: &str) -> bool {
        match self {
            StringMatch::Contains => literal.contains(wanted),
            StringMatch::Equals => literal == wanted,
        }
    }
}

/// String-usage predicates identifying a method without knowing its name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodSignature {
    pub self_strings: Vec<String>,
    pub caller_strings: Vec<String>,
    pub string_match: StringMatch,
}

impl MethodSignature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn using_strings<I, S>(mut self, strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.self_strings.extend(strings.into_iter().map(Into::into));
        self
    }

    pub fn caller_using_strings<I, S>(mut self, strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.caller_strings
            .extend(strings.into_iter().map(Into::into));
        self
    }

    pub fn string_match(mut self, string_match: StringMatch) -> Self {
        self.string_match = string_match;
        self
    }
}

impl Display for MethodSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "uses {:?}, caller uses {:?}",
            self.self_strings, self.caller_strings
        )?;
        if self.string_match == StringMatch::Equals {
            write!(f, ", exact")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_the_default() {
        let signature = MethodSignature::new().using_strings(["&y="]);

        assert_eq!(signature.string_match, StringMatch::Contains);
        assert!(StringMatch::Contains.matches("&y=%d&fps=", "&y="));
        assert!(!StringMatch::Equals.matches("&y=%d&fps=", "&y="));
        assert!(StringMatch::Equals.matches("&y=", "&y="));
    }
}
