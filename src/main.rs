use std::collections::BTreeSet;
use std::io;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tutor_api::{RetryPolicy, TutorApiClient, TutorApiConfig};
use tutor_chat::app::App;
use tutor_chat::runtime::RuntimeController;
use tutor_chat::session::SessionContext;
use tutor_chat::sink::TerminalSink;

const BASE_URL_ENV_VAR: &str = "TUTOR_CHAT_BASE_URL";
const TOPIC_ENV_VAR: &str = "TUTOR_CHAT_TOPIC";
const MODEL_ENV_VAR: &str = "TUTOR_CHAT_MODEL";
const TOOLS_ENV_VAR: &str = "TUTOR_CHAT_TOOLS";

const DEFAULT_TOPIC: &str = "fractions";
const DEFAULT_MODEL: &str = "deepseek-r1";

fn env_or(var: &str, default: &str) -> String {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

fn tools_from_env() -> BTreeSet<String> {
    std::env::var(TOOLS_ENV_VAR)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|tool| !tool.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = TutorApiConfig::default()
        .with_base_url(env_or(BASE_URL_ENV_VAR, tutor_api::url::DEFAULT_BASE_URL));
    let client = TutorApiClient::new(config).map_err(io::Error::other)?;

    let mut context = SessionContext::new(
        env_or(TOPIC_ENV_VAR, DEFAULT_TOPIC),
        env_or(MODEL_ENV_VAR, DEFAULT_MODEL),
    );
    context.tutor_tools = tools_from_env();

    // Credential bootstrap is best-effort: the session proceeds without a
    // token when the endpoint is unreachable.
    let token = match client.fetch_token().await {
        Ok(token) => Some(token),
        Err(error) => {
            warn!(%error, "token bootstrap failed, continuing without a credential");
            None
        }
    };

    let (mut host, mut completions) = RuntimeController::new(client, RetryPolicy::default());
    let mut sink = TerminalSink;
    let mut app = App::new(context);
    app.set_token(token);

    // Initial startup message for the selected topic.
    let topic = app.context().topic.clone();
    app.on_topic_changed(topic, &mut host, &mut sink);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            completion = completions.recv() => {
                let Some(completion) = completion else { break; };
                app.on_fetch_outcome(
                    completion.generation,
                    completion.outcome,
                    &mut host,
                    &mut sink,
                );
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        app.on_input_replace(line);
                        app.on_submit(&mut host, &mut sink);
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}
