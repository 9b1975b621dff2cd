pub mod detect;
pub mod translate;

use super::args::{Cli, Command};

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Ds(args) => translate::cmd_ds(args),
        Command::Eps(args) => translate::cmd_eps(args),
        Command::Sentiment(args) => translate::cmd_sentiment(args),
        Command::Category(args) => translate::cmd_category(args),
        Command::Topics(args) => translate::cmd_topics(args),
        Command::Concepts(args) => translate::cmd_concepts(args),
        Command::Detect(args) => detect::cmd_detect(args),
    }
}
