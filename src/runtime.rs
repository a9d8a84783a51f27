use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;
use tutor_api::{
    parse_error_detail, ChatRequest, Endpoint, ReplyBody, RetryPolicy, TutorApiClient,
};

use crate::app::{FetchOutcome, Generation, HostOps};

/// Terminal completion of one dispatched fetch, tagged with the generation
/// it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCompletion {
    pub generation: Generation,
    pub outcome: FetchOutcome,
}

/// Bridges the session state machine to the transport client.
///
/// Fetches run as spawned tasks; their classified outcomes return through
/// the completion channel and are applied to the `App` on the driving task,
/// which is what keeps transcript mutation single-threaded.
pub struct RuntimeController {
    client: Arc<TutorApiClient>,
    policy: RetryPolicy,
    completions: mpsc::UnboundedSender<FetchCompletion>,
}

impl RuntimeController {
    pub fn new(
        client: TutorApiClient,
        policy: RetryPolicy,
    ) -> (Self, mpsc::UnboundedReceiver<FetchCompletion>) {
        let (completions, receiver) = mpsc::unbounded_channel();
        (
            Self {
                client: Arc::new(client),
                policy,
                completions,
            },
            receiver,
        )
    }

    pub fn client(&self) -> &TutorApiClient {
        &self.client
    }

    fn dispatch(&self, endpoint: Endpoint, generation: Generation) {
        let client = Arc::clone(&self.client);
        let policy = self.policy.clone();
        let completions = self.completions.clone();

        tokio::spawn(async move {
            debug!(generation, url = %endpoint.url, "dispatching fetch");
            let outcome = run_fetch(&client, &endpoint, &policy).await;
            // A dropped receiver means the session loop is gone; nothing
            // left to apply the outcome to.
            let _ = completions.send(FetchCompletion {
                generation,
                outcome,
            });
        });
    }
}

impl HostOps for RuntimeController {
    fn fetch_startup(&mut self, topic: &str, generation: Generation) -> Result<(), String> {
        self.dispatch(self.client.startup_endpoint(topic), generation);
        Ok(())
    }

    fn fetch_chat(
        &mut self,
        request: ChatRequest,
        generation: Generation,
    ) -> Result<(), String> {
        let endpoint = self
            .client
            .chat_endpoint(&request)
            .map_err(|error| error.to_string())?;
        self.dispatch(endpoint, generation);
        Ok(())
    }
}

/// Runs one resilient fetch and classifies the result the way the session
/// controller consumes it: transport-level failure and retry exhaustion
/// become `Failed`, non-success statuses become `ApplicationError` with the
/// decoded detail, and a success status without a decodable `reply` field is
/// a decode failure rather than a crash.
async fn run_fetch(
    client: &TutorApiClient,
    endpoint: &Endpoint,
    policy: &RetryPolicy,
) -> FetchOutcome {
    let response = match client.fetch_with_retry(endpoint, policy).await {
        Ok(response) => response,
        Err(error) => return FetchOutcome::Failed(error.to_string()),
    };

    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(error) => {
            return FetchOutcome::Failed(format!("failed to read response body: {error}"))
        }
    };

    if !status.is_success() {
        return FetchOutcome::ApplicationError(parse_error_detail(status, &body));
    }

    match serde_json::from_str::<ReplyBody>(&body) {
        Ok(decoded) => FetchOutcome::Reply(decoded.reply),
        Err(error) => FetchOutcome::Failed(format!("malformed reply body: {error}")),
    }
}
