//! The translation pipeline: read, extract, render, write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::archive::ScoreArchive;
use crate::error::{TranslateError, TranslateResult};
use crate::extract::ExtractedTokens;
use crate::request::{CopyVars, ResolvedRequest, TranslationRequest};
use crate::template::Bindings;
use crate::variant::Variant;

/// Generated script plus the names it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedArtifact {
    pub variant: Variant,
    pub out_file: PathBuf,
    pub py_code: String,
    pub out_caslib: String,
    /// Result key → table name, e.g. `out_castable_matches`.
    #[serde(flatten)]
    pub tables: BTreeMap<String, String>,
    /// Raw score code returned alongside, keyed `data_step` or `ds2_raw`.
    #[serde(flatten)]
    pub extras: BTreeMap<String, String>,
}

impl RenderedArtifact {
    pub fn table(&self, key: &str) -> Option<&str> {
        self.tables.get(key).map(String::as_str)
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }
}

/// Translate the archive named in `request` and write the script.
///
/// The request is validated before the archive is opened, and the script is
/// fully rendered before anything is written. An existing file at the output
/// path is replaced.
pub fn translate(variant: Variant, request: &TranslationRequest) -> TranslateResult<RenderedArtifact> {
    let spec = variant.spec();
    let resolved = request.resolve(spec)?;

    let mut archive = ScoreArchive::open(&resolved.in_file, resolved.limits)?;
    let score = archive.read_text(spec.member)?;
    let artifact = render(variant, &score, &resolved)?;

    write_artifact(&artifact)?;
    eprintln!(
        "The file was successfully written to {}",
        artifact.out_file.display()
    );
    Ok(artifact)
}

/// Render the script for already-read score text. Does no I/O.
pub fn render(
    variant: Variant,
    score: &str,
    resolved: &ResolvedRequest,
) -> TranslateResult<RenderedArtifact> {
    let spec = variant.spec();

    let mut overrides = BTreeMap::new();
    if let Some(hostname) = resolved.hostname.as_deref() {
        overrides.insert("hostname", hostname);
    }
    let tokens = spec.extraction.extract(score, spec.member, &overrides)?;

    let mut bindings = Bindings::new();
    bindings
        .bind("in_caslib", resolved.in_caslib.as_str())
        .bind("in_castable", resolved.in_castable.as_str())
        .bind("out_caslib", resolved.out_caslib.as_str());
    for (key, name) in &resolved.tables {
        bindings.bind(key.as_str(), name.as_str());
    }
    if let Some(key) = resolved.key_column.as_deref() {
        bindings.bind("key_column", key);
    }
    if let Some(doc) = resolved.document_column.as_deref() {
        bindings.bind("document_column", doc);
    }
    for (name, value) in tokens.iter() {
        bindings.bind(name, value);
    }
    if spec.copy_vars {
        bindings.bind("copy_vars", copy_vars_snippet(&resolved.copy_vars)?);
    }

    let raw = match variant {
        Variant::DataStep => {
            let code = data_step_code(score, resolved, spec.primary_output);
            bindings.bind("data_step", code.as_str());
            code
        }
        Variant::Astore => {
            let astore_name = required_token(&tokens, "astore_name", spec.member)?;
            bindings.bind("astore_file_name", format!("{astore_name}.sashdat"));
            score.to_string()
        }
        _ => String::new(),
    };
    let mut extras = BTreeMap::new();
    if let Some(key) = spec.raw_key {
        extras.insert(key.to_string(), raw);
    }

    let py_code = spec.template.render(&bindings)?;
    tracing::debug!(
        variant = %variant,
        bytes = py_code.len(),
        tokens = tokens.len(),
        "rendered score code"
    );

    Ok(RenderedArtifact {
        variant,
        out_file: resolved.out_file.clone(),
        py_code,
        out_caslib: resolved.out_caslib.clone(),
        tables: resolved.tables.clone(),
        extras,
    })
}

fn required_token<'a>(
    tokens: &'a ExtractedTokens,
    name: &str,
    member: &str,
) -> TranslateResult<&'a str> {
    tokens
        .get(name)
        .ok_or_else(|| TranslateError::missing_token(name, member))
}

/// Wrap plain DATA step score code so it reads the input table and writes
/// the output table.
fn data_step_code(score: &str, resolved: &ResolvedRequest, primary: &str) -> String {
    let out_castable = resolved.table(primary).unwrap_or_default();
    format!(
        "data {}.{};\n    set {}.{};\n\n{}\nrun;\n",
        resolved.out_caslib, out_castable, resolved.in_caslib, resolved.in_castable, score
    )
}

const COPY_ALL_COLUMNS: &str = r#"## Defining scoring table obtaining column names
score_table = conn.CASTable(name = in_castable,
                            caslib = in_caslib)

column_names = score_table.columns.tolist()
"#;

/// Python assignment of `column_names` for the astore `copyVars` argument.
fn copy_vars_snippet(copy_vars: &CopyVars) -> TranslateResult<String> {
    match copy_vars {
        CopyVars::None => Ok("column_names = None\n".to_string()),
        CopyVars::All => Ok(COPY_ALL_COLUMNS.to_string()),
        CopyVars::Explicit(names) => {
            let list = serde_json::to_string(names)
                .map_err(|e| TranslateError::invalid_request("copy_vars", e.to_string()))?;
            Ok(format!("column_names = {list}\n"))
        }
    }
}

/// Write the script next to its final path, then rename it into place.
pub fn write_artifact(artifact: &RenderedArtifact) -> TranslateResult<()> {
    write_file_atomic(&artifact.out_file, artifact.py_code.as_bytes())?;
    tracing::info!(
        path = %artifact.out_file.display(),
        bytes = artifact.py_code.len(),
        "wrote translated score code"
    );
    Ok(())
}

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

fn write_file_atomic(path: &Path, bytes: &[u8]) -> TranslateResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let base = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| TranslateError::invalid_request("out_file", "path has no file name"))?;

    // Unique per call, including concurrent calls from one process.
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let tmp_path = parent.join(format!(
        ".{}.tmp-{}-{}-{}",
        base,
        std::process::id(),
        stamp,
        seq
    ));

    if let Err(err) = std::fs::write(&tmp_path, bytes) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(TranslateError::io(&tmp_path, err));
    }
    if let Err(err) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(TranslateError::io(&tmp_path, err));
    }
    Ok(())
}

/// Translate plain DATA step score code (`dmcas_scorecode.sas`).
pub fn ds_translate(request: &TranslationRequest) -> TranslateResult<RenderedArtifact> {
    translate(Variant::DataStep, request)
}

/// Translate DS2 astore score code (`dmcas_epscorecode.sas`).
pub fn eps_translate(request: &TranslationRequest) -> TranslateResult<RenderedArtifact> {
    translate(Variant::Astore, request)
}

/// Translate a Visual Text Analytics sentiment model (`ScoreCode.sas`).
pub fn nlp_sentiment_translate(request: &TranslationRequest) -> TranslateResult<RenderedArtifact> {
    translate(Variant::Sentiment, request)
}

/// Translate a Visual Text Analytics category model (`ScoreCode.sas`).
pub fn nlp_category_translate(request: &TranslationRequest) -> TranslateResult<RenderedArtifact> {
    translate(Variant::Category, request)
}

/// Translate a Visual Text Analytics topics model (`AstoreScoreCode.sas`).
pub fn nlp_topics_translate(request: &TranslationRequest) -> TranslateResult<RenderedArtifact> {
    translate(Variant::Topics, request)
}

/// Translate a Visual Text Analytics concepts model (`ScoreCode.sas`).
pub fn nlp_concepts_translate(request: &TranslationRequest) -> TranslateResult<RenderedArtifact> {
    translate(Variant::Concepts, request)
}
