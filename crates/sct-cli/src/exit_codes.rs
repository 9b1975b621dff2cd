//! Process exit codes for `sct`.

use sct_core::TranslateError;

pub const SUCCESS: i32 = 0;
pub const CONFIG_ERROR: i32 = 2; // Invalid request or CLI configuration
pub const NOT_FOUND: i32 = 3; // Archive member, token, or variant not found

/// Map an error to its exit code. Translation errors carry their own code;
/// anything else is a configuration problem.
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<TranslateError>() {
        Some(e) => e.exit_code(),
        None => CONFIG_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_errors_keep_their_code() {
        let err = anyhow::Error::new(TranslateError::missing_token("language", "ScoreCode.sas"))
            .context("translation failed");
        assert_eq!(for_error(&err), NOT_FOUND);

        let err = anyhow::anyhow!("invalid --limits JSON");
        assert_eq!(for_error(&err), CONFIG_ERROR);
    }
}
