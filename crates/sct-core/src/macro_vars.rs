//! Parser for SAS macro-variable assignments.
//!
//! Score code generated by Visual Text Analytics declares its configuration
//! as one assignment per line:
//!
//! ```text
//! %let cas_server_hostname = "viya.example.com";
//! %let language = "ENGLISH";
//! ```
//!
//! Only double-quoted values are recognised. The assignment may follow other
//! text on the same line, such as a closing `*/`. Names are case-insensitive
//! and stored lowercased. When a name is assigned more than once the first
//! assignment wins; later ones are ignored. A leading byte-order mark is
//! skipped.

use std::collections::BTreeMap;

/// A single parsed assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroVar {
    pub value: String,
    /// 1-based line number of the assignment.
    pub line: usize,
}

/// All `%let` assignments found in a score-code text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroVars {
    vars: BTreeMap<String, MacroVar>,
}

impl MacroVars {
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut vars = BTreeMap::new();
        for (idx, line) in text.lines().enumerate() {
            let Some((name, value)) = parse_let(line) else {
                continue;
            };
            let name = name.to_ascii_lowercase();
            match vars.get(&name) {
                Some(MacroVar { value: first, line }) => {
                    if *first != value {
                        tracing::debug!(
                            name = %name,
                            first_line = line,
                            ignored_line = idx + 1,
                            "ignoring repeated %let assignment"
                        );
                    }
                }
                None => {
                    vars.insert(
                        name,
                        MacroVar {
                            value: value.to_string(),
                            line: idx + 1,
                        },
                    );
                }
            }
        }
        Self { vars }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(&name.to_ascii_lowercase())
            .map(|v| v.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Parse the first `%let <name> = "<value>";` on one line.
///
/// The value runs to the last `";` on the line, so a value may itself
/// contain quote characters.
fn parse_let(line: &str) -> Option<(&str, &str)> {
    let lower = line.to_ascii_lowercase();
    lower
        .match_indices("%let")
        .find_map(|(at, _)| parse_let_at(&line[at + 4..]))
}

fn parse_let_at(rest: &str) -> Option<(&str, &str)> {
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();

    let name_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if name_len == 0 {
        return None;
    }
    let (name, rest) = rest.split_at(name_len);

    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let rest = rest.strip_prefix('"')?;
    let end = rest.rfind("\";")?;
    Some((name, &rest[..end]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_hostname_without_quotes_or_semicolon() {
        let vars = MacroVars::parse("%let cas_server_hostname = \"host.example.com\";\n");
        assert_eq!(vars.get("cas_server_hostname"), Some("host.example.com"));
    }

    #[test]
    fn parses_realistic_header() {
        let text = "\
/* VTA sentiment score code */
%let cas_server_hostname = \"viya.example.com\";
%let cas_server_port = \"5570\";
   %let language = \"ENGLISH\";\r
proc cas;
   sentimentAnalysis.applySent / language=\"&language\";
run;
";
        let vars = MacroVars::parse(text);
        assert_eq!(vars.len(), 3);
        assert_eq!(vars.get("language"), Some("ENGLISH"));
        assert_eq!(vars.get("cas_server_port"), Some("5570"));
    }

    #[test]
    fn first_assignment_wins() {
        let vars = MacroVars::parse(
            "%let mco_binary_caslib = \"Analytics_Project_1\";\n%let mco_binary_caslib = \"Public\";\n",
        );
        assert_eq!(vars.get("mco_binary_caslib"), Some("Analytics_Project_1"));
    }

    #[test]
    fn names_are_case_insensitive() {
        let vars = MacroVars::parse("%LET Input_Astore_Name = \"_ABC_ast\";");
        assert_eq!(vars.get("input_astore_name"), Some("_ABC_ast"));
        assert!(vars.contains("INPUT_ASTORE_NAME"));
    }

    #[test]
    fn tolerates_spacing_around_equals() {
        let vars = MacroVars::parse("%let language=\"GERMAN\";\n%let  x   =   \"1\" ;\n");
        assert_eq!(vars.get("language"), Some("GERMAN"));
        // `" ;` is not a terminator
        assert_eq!(vars.get("x"), None);
    }

    #[test]
    fn value_runs_to_last_terminator() {
        let vars = MacroVars::parse(r#"%let title = "say "hi"";"#);
        assert_eq!(vars.get("title"), Some(r#"say "hi""#));
    }

    #[test]
    fn ignores_non_assignments() {
        let vars = MacroVars::parse(
            "%letter = \"no\";\n* %let in a comment is still a statement start? no;\n%let = \"x\";\n%let y = unquoted;\n",
        );
        assert!(vars.is_empty());
    }

    #[test]
    fn byte_order_mark_is_skipped() {
        let vars = MacroVars::parse(
            "\u{feff}%let cas_server_hostname = \"h.example.com\";\n%let language = \"ENGLISH\";\n",
        );
        assert_eq!(vars.get("cas_server_hostname"), Some("h.example.com"));
        assert_eq!(vars.get("language"), Some("ENGLISH"));
    }

    #[test]
    fn assignment_after_comment() {
        let vars = MacroVars::parse("/* model settings */ %let language = \"ENGLISH\";\n");
        assert_eq!(vars.get("language"), Some("ENGLISH"));
    }
}
