//! Dialog controller
//!
//! Runs one turn per inbound event: parse, pure transition, execute
//! effects, render, commit. A turn holds its user's session lock from the
//! first read to the final commit.

use super::render::{RenderModel, Renderer};
use super::traits::{NoteStore, ReplySink, StorageError};
use super::SessionRegistry;
use crate::i18n::{Label, Translator};
use crate::state_machine::{transition, Effect, Event, IncomingEvent, Session};
use std::sync::Arc;

/// How a turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The event was accepted and the new window was sent
    Rendered,
    /// The event is not valid for the current state; nothing was sent
    Ignored,
    /// The note store failed; a failure notice was sent and the session
    /// left untouched
    Failed,
}

/// Generic dialog controller that can work with any note store
pub struct DialogController<S>
where
    S: NoteStore + 'static,
{
    store: S,
    renderer: Renderer,
    sessions: SessionRegistry,
}

impl<S> DialogController<S>
where
    S: NoteStore + 'static,
{
    pub fn new(store: S, translator: Arc<dyn Translator>, capacity: usize) -> Self {
        Self {
            store,
            renderer: Renderer::new(translator, capacity),
            sessions: SessionRegistry::default(),
        }
    }

    #[allow(dead_code)] // Used by tests and diagnostics
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Handle one inbound event and send its replies through `sink`
    ///
    /// Never fails: storage errors become a failure notice, invalid events
    /// are dropped, transport errors are logged.
    pub async fn handle(&self, incoming: IncomingEvent, sink: &dyn ReplySink) -> Outcome {
        let user_id = incoming.user_id.as_str();

        let event = match Event::try_from(&incoming) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(user_id = %user_id, error = %e, "Ignoring unparseable event");
                return Outcome::Ignored;
            }
        };

        let handle = self.sessions.get_or_create(user_id).await;
        let mut session = handle.lock().await;

        if event == Event::Start {
            tracing::info!(user_id = %user_id, "User started dialog");
        }

        let result = match transition(&session, event) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(
                    user_id = %user_id,
                    state = ?session.state,
                    error = %e,
                    "Ignoring event"
                );
                return Outcome::Ignored;
            }
        };

        let mut next = result.new_session;
        let model = match self.apply(user_id, &result.effects, &mut next).await {
            Ok(model) => model,
            Err(e) => {
                tracing::error!(
                    user_id = %user_id,
                    state = ?session.state,
                    error = %e,
                    "Note store failed, keeping session"
                );
                let notice = self.renderer.notice(Label::Failure);
                send_reply(sink, user_id, &notice).await;
                return Outcome::Failed;
            }
        };

        tracing::debug!(
            user_id = %user_id,
            from = ?session.state,
            to = ?next.state,
            page = next.page_number,
            "Transition committed"
        );
        *session = next;

        for effect in &result.effects {
            if let Effect::Notify { label } = effect {
                send_reply(sink, user_id, &self.renderer.notice(*label)).await;
            }
        }
        send_reply(sink, user_id, &model).await;
        for effect in &result.effects {
            if let Effect::DeleteMessage { message_id } = effect {
                if let Err(e) = sink.delete_message(user_id, *message_id).await {
                    tracing::warn!(
                        user_id = %user_id,
                        message_id = message_id,
                        error = %e,
                        "Failed to delete message"
                    );
                }
            }
        }

        Outcome::Rendered
    }

    /// Execute the storage effects, then render the window for `next`
    ///
    /// Rendering may adjust `next` (page correction). Nothing is committed
    /// here.
    async fn apply(
        &self,
        user_id: &str,
        effects: &[Effect],
        next: &mut Session,
    ) -> Result<RenderModel, StorageError> {
        for effect in effects {
            match effect {
                Effect::PutNote { title, body } => {
                    self.store.put_note(user_id, title, body).await?;
                    tracing::info!(user_id = %user_id, "Note saved");
                }
                Effect::DeleteNote { title } => {
                    self.store.delete_note(user_id, title).await?;
                    tracing::info!(user_id = %user_id, "Note deleted");
                }
                Effect::Notify { .. } | Effect::DeleteMessage { .. } => {}
            }
        }

        if Renderer::needs_notes(next) {
            let notes = self.store.get_all_notes(user_id).await?;
            Ok(self.renderer.render(next, Some(&notes)))
        } else {
            Ok(self.renderer.render(next, None))
        }
    }
}

async fn send_reply(sink: &dyn ReplySink, user_id: &str, model: &RenderModel) {
    if let Err(e) = sink.send_reply(user_id, model).await {
        tracing::warn!(user_id = %user_id, error = %e, "Failed to send reply");
    }
}
