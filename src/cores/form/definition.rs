use crate::cores::form::fields::{FieldKind, FieldSpec};

#[derive(Debug, Clone)]
pub struct StepSpec {
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

// Ordered steps plus fields that live outside any step (hidden inputs)
#[derive(Debug, Clone)]
pub struct FormDefinition {
    pub steps: Vec<StepSpec>,
    pub hidden: Vec<FieldSpec>,
}

impl FormDefinition {
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    // Steps are numbered from 1.
    pub fn step(&self, number: usize) -> Option<&StepSpec> {
        number.checked_sub(1).and_then(|index| self.steps.get(index))
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.steps
            .iter()
            .flat_map(|step| step.fields.iter())
            .chain(self.hidden.iter())
            .find(|field| field.name == name)
    }

    pub fn is_tel(&self, name: &str) -> bool {
        matches!(self.field(name).map(|f| &f.kind), Some(FieldKind::Tel))
    }
}
