//! Per-variant translation tables.
//!
//! Every supported kind of score code is described by a static
//! [`VariantSpec`]: which archive member to read, which tokens to extract,
//! which request fields it needs and the template it renders.

mod templates;

use std::fmt;
use std::io::{Read, Seek};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::archive::ScoreArchive;
use crate::error::TranslateResult;
use crate::extract::{ExtractionSpec, TokenPattern, TokenRule};
use crate::macro_vars::MacroVars;
use crate::request::AuxTable;
use crate::template::Template;

lazy_static! {
    /// Astore table names in DS2 score code look like `_6UFK2RPNFZRC0QFAKIFG1HE5I_ast`.
    static ref ASTORE_NAME: Regex = Regex::new(r"_\w+_ast").unwrap();
}

fn astore_name_regex() -> &'static Regex {
    &ASTORE_NAME
}

/// Kinds of score code the translator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Plain DATA step score code (`dmcas_scorecode.sas`).
    DataStep,
    /// DS2 code wrapping an analytic store (`dmcas_epscorecode.sas`).
    Astore,
    Sentiment,
    Category,
    Topics,
    Concepts,
}

/// Static description of one variant.
#[derive(Debug, Clone, Copy)]
pub struct VariantSpec {
    pub variant: Variant,
    /// Archive member holding the score code.
    pub member: &'static str,
    pub default_out_file: &'static str,
    /// Request field / result key naming the primary output table.
    pub primary_output: &'static str,
    pub aux_tables: &'static [AuxTable],
    /// Whether key and document column names are required.
    pub needs_columns: bool,
    /// Whether the template renders a column-copy directive.
    pub copy_vars: bool,
    /// Result key under which the raw score code is returned, if any.
    pub raw_key: Option<&'static str>,
    pub extraction: ExtractionSpec,
    pub template: Template,
}

const HOSTNAME_MACRO: TokenPattern = TokenPattern::MacroVar("cas_server_hostname");

static DATA_STEP: VariantSpec = VariantSpec {
    variant: Variant::DataStep,
    member: "dmcas_scorecode.sas",
    default_out_file: "dmcas_scorecode.py",
    primary_output: "out_castable",
    aux_tables: &[],
    needs_columns: false,
    copy_vars: false,
    raw_key: Some("data_step"),
    extraction: ExtractionSpec {
        rules: &[TokenRule::required(
            "hostname",
            TokenPattern::Between {
                label: "Host:",
                terminator: ";\n* Encoding:",
            },
        )],
    },
    template: templates::DATA_STEP,
};

static ASTORE: VariantSpec = VariantSpec {
    variant: Variant::Astore,
    member: "dmcas_epscorecode.sas",
    default_out_file: "dmcas_epscorecode.py",
    primary_output: "out_castable",
    aux_tables: &[],
    needs_columns: false,
    copy_vars: true,
    raw_key: Some("ds2_raw"),
    extraction: ExtractionSpec {
        rules: &[
            // DS2 code does not carry the server name.
            TokenRule::required("hostname", TokenPattern::Literal("myserver.com")),
            TokenRule::required("astore_name", TokenPattern::Regex(astore_name_regex)),
        ],
    },
    template: templates::ASTORE,
};

static SENTIMENT: VariantSpec = VariantSpec {
    variant: Variant::Sentiment,
    member: "ScoreCode.sas",
    default_out_file: "SentimentScoreCode.py",
    primary_output: "out_castable_sentiment",
    aux_tables: &[AuxTable::Matches, AuxTable::Features],
    needs_columns: true,
    copy_vars: false,
    raw_key: None,
    extraction: ExtractionSpec {
        rules: &[
            TokenRule::required("hostname", HOSTNAME_MACRO),
            TokenRule::required("language", TokenPattern::MacroVar("language")),
        ],
    },
    template: templates::SENTIMENT,
};

static CATEGORY: VariantSpec = VariantSpec {
    variant: Variant::Category,
    member: "ScoreCode.sas",
    default_out_file: "CategoryScoreCode.py",
    primary_output: "out_castable_category",
    aux_tables: &[AuxTable::Matches, AuxTable::Modeling],
    needs_columns: true,
    copy_vars: false,
    raw_key: None,
    extraction: ExtractionSpec {
        rules: &[
            TokenRule::required("hostname", HOSTNAME_MACRO),
            TokenRule::required(
                "mco_binary_caslib",
                TokenPattern::MacroVar("mco_binary_caslib"),
            ),
            TokenRule::required(
                "mco_binary_table_name",
                TokenPattern::MacroVar("mco_binary_table_name"),
            ),
        ],
    },
    template: templates::CATEGORY,
};

static TOPICS: VariantSpec = VariantSpec {
    variant: Variant::Topics,
    member: "AstoreScoreCode.sas",
    default_out_file: "topicsScoreCode.py",
    primary_output: "out_castable",
    aux_tables: &[],
    needs_columns: false,
    copy_vars: true,
    raw_key: None,
    extraction: ExtractionSpec {
        rules: &[
            TokenRule::required("hostname", HOSTNAME_MACRO),
            TokenRule::required(
                "astore_caslib",
                TokenPattern::MacroVar("input_astore_caslib_name"),
            ),
            TokenRule::required(
                "astore_table_name",
                TokenPattern::MacroVar("input_astore_name"),
            ),
        ],
    },
    template: templates::TOPICS,
};

static CONCEPTS: VariantSpec = VariantSpec {
    variant: Variant::Concepts,
    member: "ScoreCode.sas",
    default_out_file: "conceptsScoreCode.py",
    primary_output: "out_castable_concepts",
    aux_tables: &[AuxTable::Facts],
    needs_columns: true,
    copy_vars: false,
    raw_key: None,
    extraction: ExtractionSpec {
        rules: &[
            TokenRule::required("hostname", HOSTNAME_MACRO),
            TokenRule::required(
                "liti_binary_caslib",
                TokenPattern::MacroVar("liti_binary_caslib"),
            ),
            TokenRule::required(
                "liti_binary_table_name",
                TokenPattern::MacroVar("liti_binary_table_name"),
            ),
        ],
    },
    template: templates::CONCEPTS,
};

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::DataStep,
        Variant::Astore,
        Variant::Sentiment,
        Variant::Category,
        Variant::Topics,
        Variant::Concepts,
    ];

    pub fn spec(self) -> &'static VariantSpec {
        match self {
            Self::DataStep => &DATA_STEP,
            Self::Astore => &ASTORE,
            Self::Sentiment => &SENTIMENT,
            Self::Category => &CATEGORY,
            Self::Topics => &TOPICS,
            Self::Concepts => &CONCEPTS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DataStep => "data_step",
            Self::Astore => "astore",
            Self::Sentiment => "sentiment",
            Self::Category => "category",
            Self::Topics => "topics",
            Self::Concepts => "concepts",
        }
    }

    /// Guess the variant of an archive from its members.
    ///
    /// `ScoreCode.sas` is shared by three text analytics variants; they are
    /// told apart by the `%let` names the code declares. Returns `None` when
    /// nothing recognisable is present.
    pub fn detect<R: Read + Seek>(archive: &mut ScoreArchive<R>) -> TranslateResult<Option<Self>> {
        if archive.has_member(TOPICS.member) {
            return Ok(Some(Self::Topics));
        }
        if archive.has_member(SENTIMENT.member) {
            let text = archive.read_text(SENTIMENT.member)?;
            let vars = MacroVars::parse(&text);
            let variant = if vars.contains("mco_binary_caslib") {
                Some(Self::Category)
            } else if vars.contains("liti_binary_caslib") {
                Some(Self::Concepts)
            } else if vars.contains("language") {
                Some(Self::Sentiment)
            } else {
                None
            };
            return Ok(variant);
        }
        if archive.has_member(ASTORE.member) {
            return Ok(Some(Self::Astore));
        }
        if archive.has_member(DATA_STEP.member) {
            return Ok(Some(Self::DataStep));
        }
        Ok(None)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data_step" | "ds" => Ok(Self::DataStep),
            "astore" | "eps" => Ok(Self::Astore),
            "sentiment" => Ok(Self::Sentiment),
            "category" => Ok(Self::Category),
            "topics" => Ok(Self::Topics),
            "concepts" => Ok(Self::Concepts),
            other => Err(format!("unknown score-code variant: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::find_placeholders;

    #[test]
    fn astore_regex_matches_generated_names() {
        let text = "      dcl package score sc();\n      sc.setvars('_6UFK2RPNFZRC0QFAKIFG1HE5I_ast');";
        assert_eq!(
            ASTORE_NAME.find(text).map(|m| m.as_str()),
            Some("_6UFK2RPNFZRC0QFAKIFG1HE5I_ast")
        );
    }

    #[test]
    fn specs_are_consistent() {
        for variant in Variant::ALL {
            let spec = variant.spec();
            assert_eq!(spec.variant, variant);
            assert_eq!(variant.as_str().parse::<Variant>().unwrap(), variant);
            assert!(spec.default_out_file.ends_with(".py"));
            assert!(spec.member.ends_with(".sas"));
        }
    }

    #[test]
    fn templates_only_use_known_placeholders() {
        for variant in Variant::ALL {
            let spec = variant.spec();
            for name in spec.template.placeholders() {
                let known = spec.extraction.rules.iter().any(|r| r.name == name)
                    || spec.aux_tables.iter().any(|a| a.binding() == name)
                    || [
                        "in_caslib",
                        "in_castable",
                        "out_caslib",
                        spec.primary_output,
                        "key_column",
                        "document_column",
                        "copy_vars",
                        "data_step",
                        "astore_file_name",
                    ]
                    .contains(&name);
                assert!(known, "{variant}: unexpected placeholder {name}");
            }
        }
    }

    #[test]
    fn every_template_has_connection_and_head() {
        for variant in Variant::ALL {
            let spec = variant.spec();
            let names: Vec<_> = spec.template.blocks.iter().map(|b| b.name).collect();
            assert_eq!(names.first(), Some(&"header"), "{variant}");
            assert!(names.contains(&"variables"), "{variant}");
            assert!(names.contains(&"connection"), "{variant}");
            assert_eq!(names.last(), Some(&"output"), "{variant}");
            let header = spec.template.blocks[0].body;
            assert!(find_placeholders(header).is_empty());
            assert!(header.contains("pip install swat"));
        }
    }
}
