//! Conversation controller

use crate::state_machine::{
    transition, ConversationState, Effect, Event, Selection, TransitionError,
};
use crate::transcript::{Message, Transcript};
use crate::tutor::TutorClient;
use tokio::sync::{broadcast, mpsc};

const BROADCAST_CAPACITY: usize = 64;

/// Single-session conversation controller.
///
/// Mutating methods take `&mut self`, so at most one remote call can be
/// in flight and no two inputs can interleave their state changes.
pub struct ConversationController<C: TutorClient> {
    session_id: String,
    state: ConversationState,
    selection: Selection,
    transcript: Transcript,
    client: C,
    broadcast_tx: broadcast::Sender<Message>,
}

impl<C: TutorClient> ConversationController<C> {
    pub fn new(client: C) -> Self {
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            state: ConversationState::Initial,
            selection: Selection::default(),
            transcript: Transcript::new(),
            client,
            broadcast_tx,
        }
    }

    #[allow(dead_code)] // API completeness
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[allow(dead_code)] // API completeness
    pub fn state(&self) -> ConversationState {
        self.state
    }

    #[allow(dead_code)] // API completeness
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[allow(dead_code)] // API completeness
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Receive every message appended from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.broadcast_tx.subscribe()
    }

    /// Greet the student and wait for an operation
    pub async fn start(&mut self) -> Result<(), TransitionError> {
        tracing::info!(session_id = %self.session_id, "Starting tutoring session");
        self.process_event(Event::SessionStarted).await
    }

    /// Handle one line typed by the student, including any remote call it
    /// triggers
    pub async fn handle_input(&mut self, text: &str) -> Result<(), TransitionError> {
        self.process_event(Event::user_input(text)).await
    }

    /// Start the session, then consume input lines until the channel
    /// closes. Lines sent while a request is outstanding wait their turn.
    pub async fn run(mut self, mut input_rx: mpsc::Receiver<String>) {
        if let Err(e) = self.start().await {
            tracing::error!(error = %e, "Failed to start session");
            return;
        }

        while let Some(line) = input_rx.recv().await {
            if let Err(e) = self.handle_input(&line).await {
                tracing::error!(session_id = %self.session_id, error = %e, "Error handling input");
            }
        }

        tracing::info!(
            session_id = %self.session_id,
            messages = self.transcript.len(),
            "Tutoring session ended"
        );
    }

    async fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        // A request effect yields a follow-up event; keep going until none is left
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            let result = transition(self.state, self.selection, current_event)?;

            if result.new_state != self.state {
                tracing::debug!(
                    session_id = %self.session_id,
                    from = %self.state,
                    to = %result.new_state,
                    "State transition"
                );
            }
            self.state = result.new_state;
            self.selection = result.selection;

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(effect).await {
                    events_to_process.push(generated_event);
                }
            }
        }

        Ok(())
    }

    async fn execute_effect(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::AppendMessage { author, text } => {
                let message = self.transcript.push(author, text).clone();
                // No subscribers is fine; the transcript keeps the message
                let _ = self.broadcast_tx.send(message);
                None
            }

            Effect::SendRequest { request } => {
                let action = request.action();
                tracing::info!(session_id = %self.session_id, %action, "Sending tutor request");

                match self.client.send(&request).await {
                    Ok(response) => Some(Event::ResponseReceived { action, response }),
                    Err(e) => {
                        tracing::warn!(
                            session_id = %self.session_id,
                            %action,
                            kind = e.kind.as_str(),
                            error = %e,
                            "Tutor request failed, resetting conversation"
                        );
                        Some(Event::RequestFailed { detail: e.detail })
                    }
                }
            }
        }
    }
}
