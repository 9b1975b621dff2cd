use anyhow::{Context, Result};
use sct_core::{AuxTable, CopyVars, RenderedArtifact, TranslationRequest, Variant};

use crate::cli::args::{
    CategoryArgs, ColumnArgs, ConceptsArgs, DsArgs, EpsArgs, OutputFormat, SentimentArgs,
    TableArgs, TopicsArgs,
};
use crate::cli::helpers::parse_limits;
use crate::exit_codes::SUCCESS;

fn base_request(table: &TableArgs) -> Result<TranslationRequest> {
    let mut req = TranslationRequest::new(
        &table.in_file,
        &table.in_caslib,
        &table.in_castable,
        &table.out_caslib,
        &table.out_castable,
    )
    .with_limits(parse_limits(table.limits.as_deref())?);
    if let Some(hostname) = &table.hostname {
        req = req.with_hostname(hostname);
    }
    if let Some(out_file) = &table.out_file {
        req = req.with_out_file(out_file);
    }
    Ok(req)
}

fn with_columns(req: TranslationRequest, columns: &ColumnArgs) -> TranslationRequest {
    req.with_columns(&columns.key_column, &columns.document_column)
}

fn with_aux(req: TranslationRequest, table: AuxTable, name: &Option<String>) -> TranslationRequest {
    match name {
        Some(name) => req.with_aux_table(table, name),
        None => req,
    }
}

fn with_copy_vars(req: TranslationRequest, copy_vars: &Option<String>) -> TranslationRequest {
    match copy_vars {
        Some(list) => {
            let parsed = list.parse::<CopyVars>().unwrap_or_default();
            req.with_copy_vars(parsed)
        }
        None => req,
    }
}

fn run(variant: Variant, req: &TranslationRequest, format: OutputFormat) -> Result<i32> {
    let artifact = sct_core::translate(variant, req)
        .with_context(|| format!("{} translation of {} failed", variant, req.in_file.display()))?;
    report(&artifact, format)?;
    Ok(SUCCESS)
}

fn report(artifact: &RenderedArtifact, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(artifact)?;
            println!("{json}");
        }
        OutputFormat::Text => {
            println!("variant:    {}", artifact.variant);
            println!("out_file:   {}", artifact.out_file.display());
            println!("out_caslib: {}", artifact.out_caslib);
            for (key, name) in &artifact.tables {
                println!("{key}: {name}");
            }
        }
    }
    Ok(())
}

pub fn cmd_ds(args: DsArgs) -> Result<i32> {
    let req = base_request(&args.table)?;
    run(Variant::DataStep, &req, args.table.format)
}

pub fn cmd_eps(args: EpsArgs) -> Result<i32> {
    let req = with_copy_vars(base_request(&args.table)?, &args.copy_vars);
    run(Variant::Astore, &req, args.table.format)
}

pub fn cmd_sentiment(args: SentimentArgs) -> Result<i32> {
    let req = with_columns(base_request(&args.table)?, &args.columns);
    let req = with_aux(req, AuxTable::Matches, &args.out_castable_matches);
    let req = with_aux(req, AuxTable::Features, &args.out_castable_features);
    run(Variant::Sentiment, &req, args.table.format)
}

pub fn cmd_category(args: CategoryArgs) -> Result<i32> {
    let req = with_columns(base_request(&args.table)?, &args.columns);
    let req = with_aux(req, AuxTable::Matches, &args.out_castable_matches);
    let req = with_aux(req, AuxTable::Modeling, &args.out_castable_modeling);
    run(Variant::Category, &req, args.table.format)
}

pub fn cmd_topics(args: TopicsArgs) -> Result<i32> {
    let req = with_copy_vars(base_request(&args.table)?, &args.copy_vars);
    run(Variant::Topics, &req, args.table.format)
}

pub fn cmd_concepts(args: ConceptsArgs) -> Result<i32> {
    let req = with_columns(base_request(&args.table)?, &args.columns);
    let req = with_aux(req, AuxTable::Facts, &args.out_castable_facts);
    run(Variant::Concepts, &req, args.table.format)
}
