//! Token extraction from raw score code.
//!
//! Each variant declares an [`ExtractionSpec`]: an ordered list of rules that
//! say which token to pull out of the score text and how to find it. Every
//! rule yields at most one value, the first match in the text.

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::{TranslateError, TranslateResult};
use crate::macro_vars::MacroVars;

/// How a token is located in the score text.
#[derive(Debug, Clone, Copy)]
pub enum TokenPattern {
    /// Value of a `%let <name> = "<value>";` assignment.
    MacroVar(&'static str),
    /// Trimmed text after the first `label` and before the next `terminator`.
    Between {
        label: &'static str,
        terminator: &'static str,
    },
    /// Whole text of the first match of the regex returned by the function.
    Regex(fn() -> &'static Regex),
    /// Not present in the text; always this value unless overridden.
    Literal(&'static str),
}

/// One token to extract.
#[derive(Debug, Clone, Copy)]
pub struct TokenRule {
    pub name: &'static str,
    pub pattern: TokenPattern,
    pub required: bool,
}

impl TokenRule {
    pub const fn required(name: &'static str, pattern: TokenPattern) -> Self {
        Self {
            name,
            pattern,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, pattern: TokenPattern) -> Self {
        Self {
            name,
            pattern,
            required: false,
        }
    }
}

/// Ordered extraction rules for one variant.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionSpec {
    pub rules: &'static [TokenRule],
}

/// Tokens pulled from the score text, keyed by rule name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedTokens {
    values: BTreeMap<String, String>,
}

impl ExtractedTokens {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ExtractionSpec {
    /// Apply every rule to `text`.
    ///
    /// A rule whose name appears in `overrides` is not searched for; the
    /// override value is taken as is. `member` names the source in errors.
    pub fn extract(
        &self,
        text: &str,
        member: &str,
        overrides: &BTreeMap<&str, &str>,
    ) -> TranslateResult<ExtractedTokens> {
        let needs_vars = self
            .rules
            .iter()
            .any(|r| matches!(r.pattern, TokenPattern::MacroVar(_)));
        let vars = if needs_vars {
            MacroVars::parse(text)
        } else {
            MacroVars::default()
        };

        let mut values = BTreeMap::new();
        for rule in self.rules {
            let found = match overrides.get(rule.name) {
                Some(value) => Some((*value).to_string()),
                None => find_token(&rule.pattern, text, &vars),
            };
            match found {
                Some(value) => {
                    tracing::debug!(token = rule.name, value = %value, "extracted token");
                    values.insert(rule.name.to_string(), value);
                }
                None if rule.required => {
                    return Err(TranslateError::missing_token(rule.name, member));
                }
                None => {}
            }
        }
        Ok(ExtractedTokens { values })
    }
}

fn find_token(pattern: &TokenPattern, text: &str, vars: &MacroVars) -> Option<String> {
    match pattern {
        TokenPattern::MacroVar(name) => vars.get(name).map(str::to_string),
        TokenPattern::Between { label, terminator } => {
            find_between(text, label, terminator).map(str::to_string)
        }
        TokenPattern::Regex(regex) => regex().find(text).map(|m| m.as_str().to_string()),
        TokenPattern::Literal(value) => Some((*value).to_string()),
    }
}

/// Text between the first `label` and the following `terminator`, trimmed.
///
/// A terminator containing `\n` also matches the same text with `\r\n`.
/// An empty result counts as not found.
pub fn find_between<'a>(text: &'a str, label: &str, terminator: &str) -> Option<&'a str> {
    let start = text.find(label)? + label.len();
    let rest = &text[start..];
    let end = rest.find(terminator).or_else(|| {
        terminator
            .contains('\n')
            .then(|| terminator.replace('\n', "\r\n"))
            .and_then(|crlf| rest.find(&crlf))
    })?;
    let value = rest[..end].trim();
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref AST: Regex = Regex::new(r"_\w+_ast").unwrap();
    }

    fn ast() -> &'static Regex {
        &AST
    }

    const HOST_RULES: &[TokenRule] = &[TokenRule::required(
        "hostname",
        TokenPattern::MacroVar("cas_server_hostname"),
    )];

    #[test]
    fn macro_var_rule() {
        let spec = ExtractionSpec { rules: HOST_RULES };
        let tokens = spec
            .extract(
                "%let cas_server_hostname = \"host.example.com\";\n",
                "ScoreCode.sas",
                &BTreeMap::new(),
            )
            .unwrap();
        assert_eq!(tokens.get("hostname"), Some("host.example.com"));
    }

    #[test]
    fn override_skips_search() {
        let spec = ExtractionSpec { rules: HOST_RULES };
        let overrides = BTreeMap::from([("hostname", "override.example.com")]);
        let tokens = spec.extract("", "ScoreCode.sas", &overrides).unwrap();
        assert_eq!(tokens.get("hostname"), Some("override.example.com"));
    }

    #[test]
    fn required_rule_missing_fails() {
        let spec = ExtractionSpec { rules: HOST_RULES };
        let err = spec
            .extract("%let language = \"ENGLISH\";", "ScoreCode.sas", &BTreeMap::new())
            .unwrap_err();
        assert!(err.is_missing_token());
    }

    #[test]
    fn optional_rule_missing_is_absent() {
        const RULES: &[TokenRule] = &[TokenRule::optional(
            "language",
            TokenPattern::MacroVar("language"),
        )];
        let tokens = ExtractionSpec { rules: RULES }
            .extract("", "ScoreCode.sas", &BTreeMap::new())
            .unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn regex_rule_takes_first_match() {
        let text = "dcl package score sc();\nsc.setvars('_9XK2_ast');\n/* _OTHER_ast */";
        const RULES: &[TokenRule] = &[TokenRule::required("astore_name", TokenPattern::Regex(ast))];
        let tokens = ExtractionSpec { rules: RULES }
            .extract(text, "dmcas_epscorecode.sas", &BTreeMap::new())
            .unwrap();
        assert_eq!(tokens.get("astore_name"), Some("_9XK2_ast"));
    }

    #[test]
    fn literal_rule_always_matches() {
        const RULES: &[TokenRule] = &[TokenRule::required(
            "hostname",
            TokenPattern::Literal("myserver.com"),
        )];
        let tokens = ExtractionSpec { rules: RULES }
            .extract("", "x.sas", &BTreeMap::new())
            .unwrap();
        assert_eq!(tokens.get("hostname"), Some("myserver.com"));
    }

    #[test]
    fn between_handles_lf_and_crlf() {
        let lf = "/* Host: viya.example.com;\n* Encoding: utf-8 */";
        let crlf = "/* Host: viya.example.com;\r\n* Encoding: utf-8 */";
        for text in [lf, crlf] {
            assert_eq!(
                find_between(text, "Host:", ";\n* Encoding:"),
                Some("viya.example.com")
            );
        }
    }

    #[test]
    fn between_missing_label_or_terminator() {
        assert_eq!(find_between("no label here", "Host:", ";\n* Encoding:"), None);
        assert_eq!(find_between("Host: x", "Host:", ";\n* Encoding:"), None);
        assert_eq!(find_between("Host: ;\n* Encoding:", "Host:", ";\n* Encoding:"), None);
    }
}
