use std::collections::BTreeMap;

use crate::cores::form::definition::FormDefinition;
use crate::cores::form::fields::{check_format, validate_field, FieldKind};
use crate::cores::form::phone::format_phone;
use crate::cores::form::referral_form::TIMESTAMP_FIELD;

pub const SUBMIT_FAILED_NOTICE: &str =
    "Oops! Something went wrong while submitting your referral. Please try again or contact us directly.";

// Flat name -> value record posted to the intake endpoint
pub type Payload = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Editing,
    Submitting,
    Succeeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIndicator {
    Completed,
    Active,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Input { name: String, value: String },
    Toggle { name: String, checked: bool },
    Blur { name: String },
    Next,
    Previous,
    JumpTo(usize),
    Submit,
    SubmitSucceeded,
    SubmitFailed,
}

// Work the rendering host has to carry out after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SendPayload(Payload),
    ScrollToForm,
    ScrollToSuccess,
    Alert(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub current_step: usize,
    pub total_steps: usize,
    pub values: BTreeMap<String, String>,
    pub errors: BTreeMap<String, String>,
    pub status: SubmitStatus,
}

impl FormState {
    /// Fresh state on step 1. Text-like inputs start empty, choice inputs start unset,
    /// and the load timestamp is recorded for the server's timing check.
    pub fn new(definition: &FormDefinition, loaded_at_millis: i64) -> Self {
        let mut values = BTreeMap::new();
        let fields = definition
            .steps
            .iter()
            .flat_map(|step| step.fields.iter())
            .chain(definition.hidden.iter());
        for field in fields {
            match field.kind {
                FieldKind::Radio { .. } | FieldKind::Consent(_) => {}
                _ => {
                    values.insert(field.name.to_string(), String::new());
                }
            }
        }
        values.insert(TIMESTAMP_FIELD.to_string(), loaded_at_millis.to_string());

        FormState {
            current_step: 1,
            total_steps: definition.total_steps(),
            values,
            errors: BTreeMap::new(),
            status: SubmitStatus::Editing,
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    // Fraction of the progress bar to fill, `current / total`.
    pub fn progress(&self) -> f64 {
        if self.total_steps == 0 {
            return 0.0;
        }
        self.current_step as f64 / self.total_steps as f64
    }

    pub fn step_indicators(&self) -> Vec<StepIndicator> {
        (1..=self.total_steps)
            .map(|n| match n.cmp(&self.current_step) {
                std::cmp::Ordering::Less => StepIndicator::Completed,
                std::cmp::Ordering::Equal => StepIndicator::Active,
                std::cmp::Ordering::Greater => StepIndicator::Upcoming,
            })
            .collect()
    }

    pub fn shows_previous(&self) -> bool {
        self.current_step > 1
    }

    pub fn shows_submit(&self) -> bool {
        self.current_step == self.total_steps
    }

    pub fn is_busy(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    pub fn shows_success(&self) -> bool {
        self.status == SubmitStatus::Succeeded
    }

    pub fn payload(&self) -> Payload {
        self.values.clone()
    }
}

/// Errors for every failing required field of `step`, keyed by field name.
pub fn validate_step(definition: &FormDefinition, state: &FormState, step: usize) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    if let Some(spec) = definition.step(step) {
        for field in &spec.fields {
            if let Err(message) = validate_field(field, state.value(field.name)) {
                errors.insert(field.name.to_string(), message.to_string());
            }
        }
    }
    errors
}

// Replaces the current step's errors with a fresh validation pass.
fn revalidate_current(definition: &FormDefinition, state: &mut FormState) -> bool {
    if let Some(spec) = definition.step(state.current_step) {
        for field in &spec.fields {
            state.errors.remove(field.name);
        }
    }
    let errors = validate_step(definition, state, state.current_step);
    let valid = errors.is_empty();
    state.errors.extend(errors);
    valid
}

fn go_to(state: &mut FormState, step: usize, effects: &mut Vec<Effect>) {
    state.current_step = step;
    effects.push(Effect::ScrollToForm);
}

/// Computes the next state for `event`. Pure: rendering and I/O are left to the caller
/// through the returned effects.
pub fn reduce(definition: &FormDefinition, state: &FormState, event: FormEvent) -> (FormState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    // The form is hidden once the referral went through.
    if state.status == SubmitStatus::Succeeded {
        return (next, effects);
    }

    match event {
        FormEvent::Input { name, value } => {
            let value = if definition.is_tel(&name) { format_phone(&value) } else { value };
            next.errors.remove(&name);
            next.values.insert(name, value);
        }
        FormEvent::Toggle { name, checked } => {
            next.errors.remove(&name);
            if checked {
                next.values.insert(name, "on".to_string());
            } else {
                next.values.remove(&name);
            }
        }
        FormEvent::Blur { name } => {
            if let Some(field) = definition.field(&name).filter(|f| f.required) {
                if let Some(message) = check_format(field, next.value(&name)) {
                    next.errors.insert(name, message.to_string());
                }
            }
        }
        FormEvent::Next => {
            if revalidate_current(definition, &mut next) && next.current_step < next.total_steps {
                let step = next.current_step + 1;
                go_to(&mut next, step, &mut effects);
            }
        }
        FormEvent::Previous => {
            if next.current_step > 1 {
                let step = next.current_step - 1;
                go_to(&mut next, step, &mut effects);
            }
        }
        FormEvent::JumpTo(step) => {
            // Only back to steps already passed; forward moves go through Next.
            if step >= 1 && step < next.current_step {
                go_to(&mut next, step, &mut effects);
            }
        }
        FormEvent::Submit => {
            if next.status == SubmitStatus::Submitting {
                return (next, effects);
            }
            if !next.shows_submit() {
                return reduce(definition, state, FormEvent::Next);
            }
            if revalidate_current(definition, &mut next) {
                next.status = SubmitStatus::Submitting;
                effects.push(Effect::SendPayload(next.payload()));
            }
        }
        FormEvent::SubmitSucceeded => {
            if next.status == SubmitStatus::Submitting {
                next.status = SubmitStatus::Succeeded;
                effects.push(Effect::ScrollToSuccess);
            }
        }
        FormEvent::SubmitFailed => {
            if next.status == SubmitStatus::Submitting {
                next.status = SubmitStatus::Editing;
                effects.push(Effect::Alert(SUBMIT_FAILED_NOTICE));
            }
        }
    }

    (next, effects)
}
