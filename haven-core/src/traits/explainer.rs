use crate::errors::HavenResult;
use crate::models::ExplanationInput;

/// Natural-language explanation step fed by the ranking core.
pub trait IExplanationGenerator: Send + Sync {
    fn explain(&self, input: &ExplanationInput) -> HavenResult<String>;
}
