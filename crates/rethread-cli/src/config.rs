//! Configuration loading helpers for the CLI.
//!
//! Leading configuration flags are routed to `ortho_config`; everything from
//! the first unrecognised token onwards belongs to the command parser.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;
use rethread_config::{ArgumentPolicy, Config};
use rethread_pipeline::{FilterPolicy, ThreadingPlan};

use crate::AppError;

/// CLI flags recognised by the configuration loader.
///
/// Keep in sync with the fields of [`Config`].
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--carrier-name",
    "--carrier-type",
    "--outer-constructor",
    "--outer-visibility",
    "--inner-constructor",
    "--argument-policy",
    "--jobs",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the leading configuration flags.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

fn process_config_flag(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    if !text.starts_with("--") {
        return FlagAction::Skip;
    }
    let (flag, has_inline_value) = match text.split_once('=') {
        Some((flag, _)) => (flag, true),
        None => (&*text, false),
    };
    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !has_inline_value,
        }
    } else {
        FlagAction::Skip
    }
}

#[derive(Debug)]
pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut pending_value = false;
    for argument in rest {
        if pending_value {
            config_arguments.push(argument.clone());
            pending_value = false;
            continue;
        }
        match process_config_flag(argument) {
            FlagAction::Include { needs_value } => {
                config_arguments.push(argument.clone());
                pending_value = needs_value;
            }
            FlagAction::Skip => break,
        }
    }

    let command_start = config_arguments.len();
    ConfigArgumentSplit {
        config_arguments,
        command_start,
    }
}

/// Builds the command-parser arguments: the program name plus the tokens
/// after the configuration flags.
pub(crate) fn command_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.first()
        .into_iter()
        .chain(args.get(split.command_start..).unwrap_or_default())
        .cloned()
        .collect()
}

/// Translates the merged configuration into a threading plan.
pub(crate) fn threading_plan(config: &Config) -> ThreadingPlan {
    ThreadingPlan::default()
        .with_outer_constructor(config.outer_constructor())
        .with_outer_visibility(config.outer_visibility())
        .with_inner_constructor(config.inner_constructor())
        .with_carrier_name(config.carrier_name())
        .with_carrier_type(config.carrier_type())
        .with_policy(filter_policy(config.argument_policy()))
}

const fn filter_policy(policy: ArgumentPolicy) -> FilterPolicy {
    match policy {
        ArgumentPolicy::Strict => FilterPolicy::Strict,
        ArgumentPolicy::BestEffort => FilterPolicy::BestEffort,
    }
}
