use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sct",
    version,
    about = "Translate SAS Viya score-code archives into SWAT Python scripts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// DATA step score code (dmcas_scorecode.sas)
    Ds(DsArgs),
    /// DS2 analytic store score code (dmcas_epscorecode.sas)
    Eps(EpsArgs),
    /// Visual Text Analytics sentiment model
    Sentiment(SentimentArgs),
    /// Visual Text Analytics category model
    Category(CategoryArgs),
    /// Visual Text Analytics topics model
    Topics(TopicsArgs),
    /// Visual Text Analytics concepts model
    Concepts(ConceptsArgs),
    /// Report which kind of score code an archive holds
    Detect(DetectArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments shared by every translation.
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Score-code zip archive downloaded from SAS Viya
    #[arg(value_name = "ARCHIVE")]
    pub in_file: PathBuf,

    /// Caslib of the table to score
    #[arg(long)]
    pub in_caslib: String,

    /// Table to score
    #[arg(long)]
    pub in_castable: String,

    /// Caslib receiving the output tables
    #[arg(long)]
    pub out_caslib: String,

    /// Primary output table
    #[arg(long)]
    pub out_castable: String,

    /// CAS server hostname (overrides the one found in the score code)
    #[arg(long, env = "SCT_HOSTNAME")]
    pub hostname: Option<String>,

    /// Output Python file (default depends on the subcommand)
    #[arg(long, short = 'o')]
    pub out_file: Option<PathBuf>,

    /// Archive limits override, JSON or @path
    #[arg(long)]
    pub limits: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Input columns read by the text analytics actions.
#[derive(Args, Debug, Clone)]
pub struct ColumnArgs {
    /// Document identifier column
    #[arg(long)]
    pub key_column: String,

    /// Document text column
    #[arg(long)]
    pub document_column: String,
}

#[derive(Args, Debug, Clone)]
pub struct DsArgs {
    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Args, Debug, Clone)]
pub struct EpsArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Columns to copy to the output: ALL, or a comma separated list
    #[arg(long)]
    pub copy_vars: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SentimentArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Matches table (default: <out-castable>_matches)
    #[arg(long)]
    pub out_castable_matches: Option<String>,

    /// Features table (default: <out-castable>_features)
    #[arg(long)]
    pub out_castable_features: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CategoryArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Matches table (default: <out-castable>_matches)
    #[arg(long)]
    pub out_castable_matches: Option<String>,

    /// Modeling table (default: <out-castable>_modeling)
    #[arg(long)]
    pub out_castable_modeling: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct TopicsArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Columns to copy to the output: ALL, or a comma separated list
    #[arg(long)]
    pub copy_vars: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ConceptsArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Facts table (default: <out-castable>_facts)
    #[arg(long)]
    pub out_castable_facts: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    /// Score-code zip archive
    #[arg(value_name = "ARCHIVE")]
    pub in_file: PathBuf,

    /// Archive limits override, JSON or @path
    #[arg(long)]
    pub limits: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}
