//! Terminal chat front end.
//!
//! Usage: `kbqa [CONFIG.yaml]`. Without an argument the config path is taken
//! from `KBQA_CONFIG`, and without that the built-in defaults apply.
//! `KBQA__SECTION__KEY` variables override either.
//! Logs go to stderr so they never interleave with the conversation.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use kbqa::{KbqaConfig, Session, TeachOutcome, TurnOutcome};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "KBQA_CONFIG";
const GREETING: &str = "What can I help you with? (/clear resets the chat, /quit exits)";
const LEARNED: &str = "Thank you! I learned a new response!";

fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    init_tracing(&config);

    let mut session = Session::from_config(&config)
        .with_context(|| format!("opening knowledge base {}", config.store.path.display()))?;
    tracing::info!(
        store = %config.store.path.display(),
        entries = session.knowledge_base().len(),
        "chat started"
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    println!("{GREETING}");
    loop {
        let Some(input) = prompt(&mut stdout, &mut lines, "You: ")? else {
            break;
        };
        let input = input.trim();
        match input {
            "" => continue,
            "/quit" => break,
            "/clear" => {
                session.clear_history();
                session.cancel_teaching();
                println!("Chat cleared.");
                continue;
            }
            _ => {}
        }

        match session.ask(input) {
            TurnOutcome::Answered { answer, .. } => println!("Bot: {answer}"),
            TurnOutcome::NeedsTeaching { .. } => {
                println!("Bot: {}", kbqa::TEACH_PROMPT);
                let label = format!(
                    "Type the answer or '{}' to skip: ",
                    config.session.skip_token.trim()
                );
                let Some(answer) = prompt(&mut stdout, &mut lines, &label)? else {
                    session.cancel_teaching();
                    break;
                };
                match session.teach(&answer).context("saving the new answer")? {
                    TeachOutcome::Learned(_) => println!("Bot: {LEARNED}"),
                    TeachOutcome::Skipped => {}
                }
            }
        }
    }

    tracing::info!(entries = session.knowledge_base().len(), "chat ended");
    Ok(())
}

fn load_config() -> anyhow::Result<KbqaConfig> {
    let path = env::args_os()
        .nth(1)
        .or_else(|| env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()))
        .map(PathBuf::from);
    KbqaConfig::load(path.as_deref()).with_context(|| match &path {
        Some(path) => format!("loading config {}", path.display()),
        None => "loading config from the environment".to_string(),
    })
}

fn init_tracing(config: &KbqaConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Print `label` and read one line; `None` on end of input.
fn prompt(
    stdout: &mut io::Stdout,
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> anyhow::Result<Option<String>> {
    write!(stdout, "{label}")?;
    stdout.flush()?;
    lines
        .next()
        .transpose()
        .context("reading from stdin")
}
