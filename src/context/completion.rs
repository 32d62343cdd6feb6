//! Interactive Completion: prompt for required fields missing from both the overrides
//! and the base context. Quiet mode skips this step entirely.
//!
//! Prompt order is fixed: bootstrap servers, version, SASL confirmation, then algorithm,
//! username and password when SASL is in effect. Schema registry and ksql are never
//! prompted for.

use crate::context::overrides::ContextOverrides;
use crate::context::profile::Context;
use crate::context::version::KafkaVersion;
use crate::error::CommandError;

/// Answers questions on behalf of the user.
pub trait Prompter: Send {
    /// Required free-text answer. `validate` returns an error message to re-ask with.
    fn text(
        &mut self,
        prompt: &str,
        validate: &dyn Fn(&str) -> Result<(), String>,
    ) -> Result<String, CommandError>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, CommandError>;

    /// Secret input; must not echo.
    fn password(&mut self, prompt: &str) -> Result<String, CommandError>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn text(
        &mut self,
        prompt: &str,
        validate: &dyn Fn(&str) -> Result<(), String>,
    ) -> Result<String, CommandError> {
        let answer: String = dialoguer::Input::new()
            .with_prompt(prompt)
            .validate_with(|input: &String| validate(input))
            .interact_text()?;
        Ok(answer)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        Ok(dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn password(&mut self, prompt: &str) -> Result<String, CommandError> {
        Ok(dialoguer::Password::new().with_prompt(prompt).interact()?)
    }
}

fn non_empty(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        Err("value is required".to_string())
    } else {
        Ok(())
    }
}

fn valid_servers(input: &str) -> Result<(), String> {
    if crate::context::overrides::split_servers(input).is_empty() {
        Err("at least one host:port is required".to_string())
    } else {
        Ok(())
    }
}

fn valid_version(input: &str) -> Result<(), String> {
    input
        .parse::<KafkaVersion>()
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn valid_algorithm(input: &str) -> Result<(), String> {
    input
        .parse::<crate::context::profile::SaslMechanism>()
        .map(|_| ())
}

/// Fill `overrides` in place for every required field absent from both sides.
pub fn complete(
    base: &Context,
    overrides: &mut ContextOverrides,
    prompter: &mut dyn Prompter,
    quiet: bool,
) -> Result<(), CommandError> {
    if quiet {
        return Ok(());
    }

    if !overrides.bootstrap_servers.provided() && base.bootstrap_servers.is_empty() {
        let servers = prompter.text("Bootstrap servers", &valid_servers)?;
        overrides.set_bootstrap_servers(&servers);
    }

    if !overrides.kafka_version.provided() && base.kafka_version.is_none() {
        let raw = prompter.text("Kafka version", &valid_version)?;
        let version = raw
            .parse::<KafkaVersion>()
            .map_err(|e| CommandError::Validation(e.to_string()))?;
        overrides.kafka_version.set(version);
    }

    let sasl_in_effect = if overrides.touches_sasl() || base.sasl_enabled() {
        true
    } else if prompter.confirm("Use SASL", false)? {
        overrides.sasl.set(true);
        true
    } else {
        false
    };

    if sasl_in_effect {
        if !overrides.algorithm.provided() && base.sasl_algorithm().is_none() {
            let algorithm = prompter.text("SASL Algorithm", &valid_algorithm)?;
            overrides.algorithm.set(algorithm.trim().to_string());
        }
        if !overrides.username.provided() && base.sasl_username().is_none() {
            let user = prompter.text("User", &non_empty)?;
            overrides.username.set(user);
        }
        if !overrides.password.provided() && base.sasl_password().is_none() {
            let password = prompter.password("Password")?;
            overrides.password.set(password);
        }
    }

    Ok(())
}
