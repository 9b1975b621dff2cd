use anyhow::{Context, Result};
use sct_core::{ScoreArchive, Variant};

use crate::cli::args::{DetectArgs, OutputFormat};
use crate::cli::helpers::parse_limits;
use crate::exit_codes::{NOT_FOUND, SUCCESS};

pub fn cmd_detect(args: DetectArgs) -> Result<i32> {
    let limits = parse_limits(args.limits.as_deref())?;
    let mut archive = ScoreArchive::open(&args.in_file, limits)
        .with_context(|| format!("failed to open {}", args.in_file.display()))?;
    let members = archive.member_names();
    let variant = Variant::detect(&mut archive)?;

    match args.format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "archive": args.in_file.display().to_string(),
                "variant": variant,
                "member": variant.map(|v| v.spec().member),
                "members": members,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => match variant {
            Some(v) => println!("{} ({})", v, v.spec().member),
            None => eprintln!(
                "no recognised score code in {} (members: {})",
                args.in_file.display(),
                members.join(", ")
            ),
        },
    }

    Ok(if variant.is_some() { SUCCESS } else { NOT_FOUND })
}
