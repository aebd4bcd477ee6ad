//! FlowRunner - executes prompt flows against an LLM client

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::{
    FlowError, PromptFlow, PromptFlowSpec, SchemaValidationError, Validate, normalize_context, validate_input,
    validate_output,
};
use crate::llm::{CompletionRequest, LlmClient, OutputSchema, extract_json};
use crate::prompts::PromptLoader;

const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Runs typed and untyped prompt flows
///
/// One model call per run: no retries, no streaming. A run either returns an
/// output that passed every check or an error.
pub struct FlowRunner {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    max_tokens: u32,
}

impl FlowRunner {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader) -> Self {
        Self {
            llm,
            prompts,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Spec of a typed flow
    pub fn spec<F: PromptFlow>() -> PromptFlowSpec {
        F::spec()
    }

    pub fn prompts(&self) -> &PromptLoader {
        &self.prompts
    }

    /// Execute a typed flow
    pub async fn run<F: PromptFlow>(&self, input: F::Input) -> Result<F::Output, FlowError> {
        debug!(flow = F::NAME, "FlowRunner::run: called");
        let (input, prompt) = prepare::<F>(&self.prompts, input)?;
        let output = OutputSchema::new(output_name(F::NAME), F::DESCRIPTION, F::output_schema());
        let payload = self.call(F::NAME, prompt, output).await?;

        let result = decode::<F>(&input, payload);
        match &result {
            Ok(_) => info!(flow = F::NAME, "Flow completed"),
            Err(e) => warn!(flow = F::NAME, error = %e, "Flow output rejected"),
        }
        Ok(result?)
    }

    /// Execute an untyped flow: schema checks only, no semantic rules
    pub async fn run_spec(&self, spec: &PromptFlowSpec, mut context: Value) -> Result<Value, FlowError> {
        debug!(flow = %spec.name, "FlowRunner::run_spec: called");
        normalize_context(&spec.input_schema, &mut context);
        validate_input(&spec.input_schema, &context)?;

        let prompt = self
            .prompts
            .render(&spec.template, &context)
            .map_err(|e| FlowError::Render(e.to_string()))?;
        let output = OutputSchema::new(output_name(&spec.name), spec.description.clone(), spec.output_schema.clone());
        let payload = self.call(&spec.name, prompt, output).await?;

        validate_output(&spec.output_schema, &payload)?;
        info!(flow = %spec.name, "Flow completed");
        Ok(payload)
    }

    async fn call(&self, flow: &str, prompt: String, output: OutputSchema) -> Result<Value, FlowError> {
        let system_prompt = self
            .prompts
            .system_prompt()
            .map_err(|e| FlowError::Render(e.to_string()))?;
        let request = CompletionRequest {
            system_prompt,
            prompt,
            output,
            max_tokens: self.max_tokens,
        };

        let response = self.llm.complete(request).await.inspect_err(|e| {
            warn!(%flow, error = %e, "Model call failed");
        })?;
        debug!(%flow, tokens = response.usage.total(), stop = ?response.stop_reason, "FlowRunner::call: response received");

        response
            .payload
            .or_else(|| response.text.as_deref().and_then(extract_json))
            .ok_or_else(|| {
                warn!(%flow, "Model returned no structured payload");
                FlowError::Schema(SchemaValidationError::MissingPayload)
            })
    }
}

/// Normalize and validate the input, then render the flow's prompt
///
/// Nothing is sent to the model; callers use this to preview a prompt.
pub fn prepare<F: PromptFlow>(prompts: &PromptLoader, mut input: F::Input) -> Result<(F::Input, String), FlowError> {
    input.normalize();
    if let Err(e) = input.validate() {
        debug!(flow = F::NAME, error = %e, "prepare: input rejected");
        return Err(e.into());
    }
    let context = F::prompt_context(&input)?;
    let prompt = prompts
        .render(F::TEMPLATE, &context)
        .map_err(|e| FlowError::Render(e.to_string()))?;
    Ok((input, prompt))
}

/// Schema check, typed decode, then the flow's own rules
fn decode<F: PromptFlow>(input: &F::Input, payload: Value) -> Result<F::Output, SchemaValidationError> {
    validate_output(&F::output_schema(), &payload)?;
    let output: F::Output =
        serde_json::from_value(payload).map_err(|e| SchemaValidationError::Decode(e.to_string()))?;
    F::check_output(input, &output)?;
    Ok(output)
}

/// `generateDailyItinerary` -> `generate_daily_itinerary`
fn output_name(flow: &str) -> String {
    let mut name = String::with_capacity(flow.len() + 4);
    for c in flow.chars() {
        if c.is_ascii_uppercase() {
            if !name.is_empty() {
                name.push('_');
            }
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}
