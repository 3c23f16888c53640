use log::error;

use crate::cores::form::definition::FormDefinition;
use crate::cores::form::state::{reduce, Effect, FormEvent, FormState};
use crate::cores::form::transport::SubmitTransport;

// Rendering side of the form; called after every state change
pub trait FormView {
    fn render(&mut self, state: &FormState);
}

/// Owns the form state and routes events through the pure reducer.
///
/// Views are notified only when a transition actually changed the state.
pub struct FormController {
    definition: FormDefinition,
    state: FormState,
    views: Vec<Box<dyn FormView>>,
}

impl FormController {
    pub fn new(definition: FormDefinition, loaded_at_millis: i64) -> Self {
        let state = FormState::new(&definition, loaded_at_millis);
        FormController { definition, state, views: Vec::new() }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn subscribe(&mut self, mut view: Box<dyn FormView>) {
        view.render(&self.state);
        self.views.push(view);
    }

    pub fn dispatch(&mut self, event: FormEvent) -> Vec<Effect> {
        let (next, effects) = reduce(&self.definition, &self.state, event);
        if next != self.state {
            self.state = next;
            for view in self.views.iter_mut() {
                view.render(&self.state);
            }
        }
        effects
    }

    /// Submits the final step. Sends at most one request; the outcome is fed back
    /// as `SubmitSucceeded` or `SubmitFailed`. Returns every effect produced.
    pub async fn submit(&mut self, transport: &dyn SubmitTransport) -> Vec<Effect> {
        let mut effects = self.dispatch(FormEvent::Submit);

        let payload = effects.iter().find_map(|effect| match effect {
            Effect::SendPayload(payload) => Some(payload.clone()),
            _ => None,
        });

        if let Some(payload) = payload {
            let outcome = match transport.post(&payload).await {
                Ok(()) => FormEvent::SubmitSucceeded,
                Err(err) => {
                    error!("Submission error: {}", err);
                    FormEvent::SubmitFailed
                }
            };
            effects.extend(self.dispatch(outcome));
        }
        effects
    }
}
