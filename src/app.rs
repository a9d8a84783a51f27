use std::collections::VecDeque;

use tutor_api::{ChatRequest, WireMessage};

use crate::commands::is_restart_command;
use crate::session::{SessionContext, Transcript, Turn};
use crate::sink::PresentationSink;

/// Session epoch. Incremented on every reset; distinguishes the current
/// transcript lifetime from superseded ones so a stale in-flight fetch can
/// never mutate the transcript that replaced its own.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    AwaitingStartupReply,
    AwaitingChatReply,
}

/// Terminal result of one resilient fetch, classified for the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Success-status response with a decoded reply.
    Reply(String),
    /// Non-success application response; carries the decoded `detail` or the
    /// raw body when no detail field was present.
    ApplicationError(String),
    /// Retry exhaustion, network failure, or an undecodable reply body.
    Failed(String),
}

/// Network host the controller dispatches fetches through. Dispatch is
/// fire-and-forget; the terminal outcome comes back later via
/// [`App::on_fetch_outcome`] tagged with the same generation.
pub trait HostOps {
    fn fetch_startup(&mut self, topic: &str, generation: Generation) -> Result<(), String>;
    fn fetch_chat(&mut self, request: ChatRequest, generation: Generation)
        -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum QueuedEvent {
    Submit(String),
    TopicChanged(String),
    Restart,
}

/// The session state machine: single authority translating external events
/// into transcript mutations and network dispatches.
///
/// Event handling is serialized. An event that arrives while a fetch is
/// outstanding is queued and drained one at a time after each completion, so
/// two submissions or resets can never interleave transcript mutations.
#[derive(Debug)]
pub struct App {
    pub mode: Mode,
    pub input: String,
    transcript: Transcript,
    context: SessionContext,
    generation: Generation,
    queued: VecDeque<QueuedEvent>,
}

impl App {
    pub fn new(context: SessionContext) -> Self {
        Self {
            mode: Mode::Idle,
            input: String::new(),
            transcript: Transcript::new(),
            context,
            generation: 0,
            queued: VecDeque::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Installs the best-effort credential fetched at process start.
    pub fn set_token(&mut self, token: Option<String>) {
        self.context.token = token;
    }

    pub fn on_input_replace(&mut self, text: String) {
        self.input = text;
    }

    /// Submits the pending input. Whitespace-only input is a no-op; the
    /// restart literal delegates entirely to [`App::on_restart_requested`].
    pub fn on_submit(&mut self, host: &mut dyn HostOps, sink: &mut dyn PresentationSink) {
        let submitted = std::mem::take(&mut self.input);
        let prompt = submitted.trim().to_string();

        if prompt.is_empty() {
            return;
        }

        if is_restart_command(&prompt) {
            self.on_restart_requested(host, sink);
            return;
        }

        if self.mode != Mode::Idle {
            self.queued.push_back(QueuedEvent::Submit(prompt));
            return;
        }

        self.submit_prompt(prompt, host, sink);
    }

    /// Selects a new topic and restarts the session around it.
    pub fn on_topic_changed(
        &mut self,
        topic: impl Into<String>,
        host: &mut dyn HostOps,
        sink: &mut dyn PresentationSink,
    ) {
        let topic = topic.into();

        if self.mode != Mode::Idle {
            self.queued.push_back(QueuedEvent::TopicChanged(topic));
            return;
        }

        self.context.topic = topic;
        self.restart_session(host, sink);
    }

    /// Restarts the session for the currently selected topic, discarding any
    /// pending input.
    pub fn on_restart_requested(
        &mut self,
        host: &mut dyn HostOps,
        sink: &mut dyn PresentationSink,
    ) {
        if self.mode != Mode::Idle {
            self.queued.push_back(QueuedEvent::Restart);
            return;
        }

        self.input.clear();
        self.restart_session(host, sink);
    }

    /// Pure context mutation; takes effect on the next submission or reset.
    pub fn on_model_selected(&mut self, model: impl Into<String>) {
        self.context.model = model.into();
    }

    /// Pure context mutation; takes effect on the next submission.
    pub fn on_tool_toggled(&mut self, tool: &str, enabled: bool) {
        if enabled {
            self.context.tutor_tools.insert(tool.to_string());
        } else {
            self.context.tutor_tools.remove(tool);
        }
    }

    /// Applies the terminal outcome of an in-flight fetch.
    ///
    /// Outcomes tagged with a superseded generation, or arriving when nothing
    /// is awaited, are discarded without touching the transcript.
    pub fn on_fetch_outcome(
        &mut self,
        generation: Generation,
        outcome: FetchOutcome,
        host: &mut dyn HostOps,
        sink: &mut dyn PresentationSink,
    ) {
        if !self.should_apply_outcome(generation) {
            return;
        }

        let turn = match outcome {
            FetchOutcome::Reply(reply) => Turn::assistant(reply),
            FetchOutcome::ApplicationError(detail) => Turn::error(detail),
            FetchOutcome::Failed(description) => Turn::error(description),
        };
        sink.render_turn(&turn);
        self.transcript.push(turn);
        self.mode = Mode::Idle;

        self.drain_queued(host, sink);
    }

    /// Canonical reset: discard the transcript, clear the surface, and fetch
    /// a fresh startup message for the selected topic. Shared verbatim by
    /// topic changes and explicit restarts.
    fn restart_session(&mut self, host: &mut dyn HostOps, sink: &mut dyn PresentationSink) {
        self.generation += 1;
        self.transcript.clear();
        sink.clear_surface();

        match host.fetch_startup(&self.context.topic, self.generation) {
            Ok(()) => self.mode = Mode::AwaitingStartupReply,
            Err(error) => self.record_failure(
                format!("Failed to request startup message: {error}"),
                host,
                sink,
            ),
        }
    }

    fn submit_prompt(
        &mut self,
        prompt: String,
        host: &mut dyn HostOps,
        sink: &mut dyn PresentationSink,
    ) {
        // Transport snapshot is taken before the optimistic echo, so the
        // request carries exactly the prior turns plus this prompt.
        let mut messages = self.transcript.transport_messages();
        messages.push(WireMessage::new("user", prompt.clone()));

        let turn = Turn::user(prompt);
        sink.render_turn(&turn);
        self.transcript.push(turn);

        let request = ChatRequest {
            messages,
            token: self.context.token.clone(),
            tutor_tools: self.context.tutor_tools.iter().cloned().collect(),
            topic: self.context.topic.clone(),
            model: self.context.model.clone(),
            use_rag: false,
        };

        match host.fetch_chat(request, self.generation) {
            Ok(()) => self.mode = Mode::AwaitingChatReply,
            Err(error) => {
                self.record_failure(format!("Failed to send message: {error}"), host, sink);
            }
        }
    }

    /// Resolves a failed dispatch to a visible error turn. The user turn
    /// already appended by a failed submission stays in place.
    fn record_failure(
        &mut self,
        description: String,
        host: &mut dyn HostOps,
        sink: &mut dyn PresentationSink,
    ) {
        let turn = Turn::error(description);
        sink.render_turn(&turn);
        self.transcript.push(turn);
        self.mode = Mode::Idle;

        self.drain_queued(host, sink);
    }

    fn should_apply_outcome(&self, generation: Generation) -> bool {
        self.mode != Mode::Idle && generation == self.generation
    }

    /// One queued event per completion; a dispatched fetch flips the mode
    /// back to busy and the rest stay queued behind it.
    fn drain_queued(&mut self, host: &mut dyn HostOps, sink: &mut dyn PresentationSink) {
        let Some(event) = self.queued.pop_front() else {
            return;
        };

        match event {
            QueuedEvent::Submit(prompt) => self.submit_prompt(prompt, host, sink),
            QueuedEvent::TopicChanged(topic) => {
                self.context.topic = topic;
                self.restart_session(host, sink);
            }
            QueuedEvent::Restart => {
                self.input.clear();
                self.restart_session(host, sink);
            }
        }
    }
}
