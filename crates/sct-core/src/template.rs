//! Block templates with `${name}` placeholders.
//!
//! A [`Template`] is an ordered list of named blocks. Rendering substitutes
//! every placeholder from a [`Bindings`] map in a single pass: substituted
//! values are never rescanned, and a placeholder without a binding is an
//! error rather than being left in the output.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{TranslateError, TranslateResult};

lazy_static! {
    /// `${identifier}`
    static ref PLACEHOLDER: Regex = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
}

/// One named section of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateBlock {
    pub name: &'static str,
    pub body: &'static str,
}

impl TemplateBlock {
    pub const fn new(name: &'static str, body: &'static str) -> Self {
        Self { name, body }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub blocks: &'static [TemplateBlock],
}

/// Placeholder name → substituted text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: BTreeMap<String, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

impl Template {
    /// Distinct placeholder names used by the template, in first-use order.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut seen = Vec::new();
        for block in self.blocks {
            for name in find_placeholders(block.body) {
                if !seen.contains(&name) {
                    seen.push(name);
                }
            }
        }
        seen
    }

    pub fn render(&self, bindings: &Bindings) -> TranslateResult<String> {
        let mut out = String::new();
        for block in self.blocks {
            render_block(block, bindings, &mut out)?;
        }
        Ok(out)
    }
}

fn render_block(block: &TemplateBlock, bindings: &Bindings, out: &mut String) -> TranslateResult<()> {
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(block.body) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = bindings
            .get(name.as_str())
            .ok_or_else(|| TranslateError::UnresolvedPlaceholder {
                placeholder: name.as_str().to_string(),
                block: block.name.to_string(),
            })?;
        out.push_str(&block.body[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }
    out.push_str(&block.body[last..]);
    Ok(())
}

/// Placeholder names appearing in `text`, with repeats.
pub fn find_placeholders(text: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GREETING: Template = Template {
        blocks: &[
            TemplateBlock::new("head", "conn = swat.CAS(hostname = \"${hostname}\")\n"),
            TemplateBlock::new(
                "body",
                "tbl = {\"name\": \"${table}\", \"caslib\": \"${caslib}\"}\nprint(\"${table}\")\n",
            ),
        ],
    };

    fn bindings() -> Bindings {
        let mut b = Bindings::new();
        b.bind("hostname", "viya.example.com")
            .bind("table", "scored")
            .bind("caslib", "Public");
        b
    }

    #[test]
    fn renders_blocks_in_order() {
        let out = GREETING.render(&bindings()).unwrap();
        assert_eq!(
            out,
            "conn = swat.CAS(hostname = \"viya.example.com\")\n\
             tbl = {\"name\": \"scored\", \"caslib\": \"Public\"}\n\
             print(\"scored\")\n"
        );
        assert!(find_placeholders(&out).is_empty());
    }

    #[test]
    fn unbound_placeholder_names_block() {
        let mut b = bindings();
        b.bind("hostname", "h");
        let partial = Bindings::new();
        let err = GREETING.render(&partial).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unresolved placeholder ${hostname} in template block 'head'"
        );
        assert!(GREETING.render(&b).is_ok());
    }

    #[test]
    fn values_are_not_rescanned() {
        let mut b = bindings();
        b.bind("table", "${caslib}");
        let out = GREETING.render(&b).unwrap();
        assert!(out.contains("\"name\": \"${caslib}\""));
    }

    #[test]
    fn lists_placeholders_once() {
        assert_eq!(GREETING.placeholders(), vec!["hostname", "table", "caslib"]);
    }

    #[test]
    fn python_braces_are_literal() {
        assert!(find_placeholders("casOut = {\"name\": astore_name}").is_empty());
        assert!(find_placeholders("$name ${} ${1abc}").is_empty());
    }
}
