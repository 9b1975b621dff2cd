//! Translation requests and their normalization.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{TranslateError, TranslateResult};
use crate::limits::ArchiveLimits;
use crate::variant::VariantSpec;

/// Which input columns the generated script copies to its output table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CopyVars {
    /// Copy nothing (`column_names = None`).
    #[default]
    None,
    /// Copy every column; the generated script lists them at run time.
    All,
    /// Copy exactly these columns.
    Explicit(Vec<String>),
}

impl CopyVars {
    /// The marker accepted in place of a column list to mean "copy all".
    pub const ALL_MARKER: &'static str = "ALL";

    /// Interpret a list of names. An empty list is `None`; a single `ALL`
    /// is `All`.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        match names.as_slice() {
            [] => Self::None,
            [only] if only == Self::ALL_MARKER => Self::All,
            _ => Self::Explicit(names),
        }
    }
}

impl FromStr for CopyVars {
    type Err = std::convert::Infallible;

    /// `ALL`, or a comma separated list of column names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_names(
            s.split(',').map(str::trim).filter(|name| !name.is_empty()),
        ))
    }
}

/// Secondary output tables written by the text analytics actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuxTable {
    Matches,
    Features,
    Modeling,
    Facts,
}

impl AuxTable {
    /// Appended to the primary output name when no name is given.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Matches => "_matches",
            Self::Features => "_features",
            Self::Modeling => "_modeling",
            Self::Facts => "_facts",
        }
    }

    /// Template placeholder and result key for this table.
    pub fn binding(self) -> &'static str {
        match self {
            Self::Matches => "out_castable_matches",
            Self::Features => "out_castable_features",
            Self::Modeling => "out_castable_modeling",
            Self::Facts => "out_castable_facts",
        }
    }
}

/// Caller-supplied parameters for one translation.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub in_file: PathBuf,
    pub in_caslib: String,
    pub in_castable: String,
    pub out_caslib: String,
    /// Primary output table.
    pub out_castable: String,
    pub key_column: Option<String>,
    pub document_column: Option<String>,
    /// Overrides the hostname found in (or defaulted for) the score code.
    pub hostname: Option<String>,
    pub copy_vars: CopyVars,
    pub aux_tables: BTreeMap<AuxTable, String>,
    /// Defaults to the variant's file name in the working directory.
    pub out_file: Option<PathBuf>,
    pub limits: ArchiveLimits,
}

impl TranslationRequest {
    pub fn new(
        in_file: impl Into<PathBuf>,
        in_caslib: impl Into<String>,
        in_castable: impl Into<String>,
        out_caslib: impl Into<String>,
        out_castable: impl Into<String>,
    ) -> Self {
        Self {
            in_file: in_file.into(),
            in_caslib: in_caslib.into(),
            in_castable: in_castable.into(),
            out_caslib: out_caslib.into(),
            out_castable: out_castable.into(),
            key_column: None,
            document_column: None,
            hostname: None,
            copy_vars: CopyVars::None,
            aux_tables: BTreeMap::new(),
            out_file: None,
            limits: ArchiveLimits::default(),
        }
    }

    pub fn with_columns(
        mut self,
        key_column: impl Into<String>,
        document_column: impl Into<String>,
    ) -> Self {
        self.key_column = Some(key_column.into());
        self.document_column = Some(document_column.into());
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_copy_vars(mut self, copy_vars: CopyVars) -> Self {
        self.copy_vars = copy_vars;
        self
    }

    pub fn with_aux_table(mut self, table: AuxTable, name: impl Into<String>) -> Self {
        self.aux_tables.insert(table, name.into());
        self
    }

    pub fn with_out_file(mut self, out_file: impl Into<PathBuf>) -> Self {
        self.out_file = Some(out_file.into());
        self
    }

    pub fn with_limits(mut self, limits: ArchiveLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Validate the request against a variant and fill in derived names.
    ///
    /// Runs before any I/O.
    pub fn resolve(&self, spec: &VariantSpec) -> TranslateResult<ResolvedRequest> {
        if self.in_file.as_os_str().is_empty() {
            return Err(TranslateError::invalid_request(
                "in_file",
                "read file must be specified",
            ));
        }
        require(spec.primary_output, &self.out_castable)?;
        require("in_caslib", &self.in_caslib)?;
        require("in_castable", &self.in_castable)?;
        require("out_caslib", &self.out_caslib)?;

        let (key_column, document_column) = if spec.needs_columns {
            let key = self.key_column.as_deref().unwrap_or_default();
            let doc = self.document_column.as_deref().unwrap_or_default();
            require("key_column", key)?;
            require("document_column", doc)?;
            (Some(key.to_string()), Some(doc.to_string()))
        } else {
            (None, None)
        };

        if let Some(hostname) = &self.hostname {
            require("hostname", hostname)?;
        }

        let mut tables = BTreeMap::new();
        tables.insert(spec.primary_output.to_string(), self.out_castable.clone());
        for aux in spec.aux_tables {
            let name = match self.aux_tables.get(aux) {
                Some(name) if !name.trim().is_empty() => name.clone(),
                _ => format!("{}{}", self.out_castable, aux.suffix()),
            };
            tables.insert(aux.binding().to_string(), name);
        }

        let out_file = self
            .out_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(spec.default_out_file));

        Ok(ResolvedRequest {
            in_file: self.in_file.clone(),
            in_caslib: self.in_caslib.clone(),
            in_castable: self.in_castable.clone(),
            out_caslib: self.out_caslib.clone(),
            key_column,
            document_column,
            hostname: self.hostname.clone(),
            copy_vars: self.copy_vars.clone(),
            tables,
            out_file,
            limits: self.limits,
        })
    }
}

fn require(field: &'static str, value: &str) -> TranslateResult<()> {
    if value.trim().is_empty() {
        return Err(TranslateError::invalid_request(field, "must be defined"));
    }
    Ok(())
}

/// A request after validation, with every output name decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub in_file: PathBuf,
    pub in_caslib: String,
    pub in_castable: String,
    pub out_caslib: String,
    pub key_column: Option<String>,
    pub document_column: Option<String>,
    pub hostname: Option<String>,
    pub copy_vars: CopyVars,
    /// Result key (e.g. `out_castable_matches`) → table name, including
    /// the primary output.
    pub tables: BTreeMap<String, String>,
    pub out_file: PathBuf,
    pub limits: ArchiveLimits,
}

impl ResolvedRequest {
    pub fn table(&self, key: &str) -> Option<&str> {
        self.tables.get(key).map(String::as_str)
    }
}
