//! Layer precedence for the `rethread` configuration.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use ortho_config::OrthoConfig;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use rethread_config::{
    ArgumentPolicy, Config, DEFAULT_CARRIER_NAME, DEFAULT_INNER_CONSTRUCTOR, default_log_filter,
    default_log_format,
};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Harness {
    temp_dir: TempDir,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let guard = ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner);
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        Self {
            temp_dir,
            cli_args: RefCell::new(vec![OsString::from("rethread")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _guard: guard,
        }
    }

    fn write_config(&self, contents: &str) {
        let path = self.temp_dir.path().join("rethread.toml");
        if let Err(error) = fs::write(&path, contents) {
            panic!("failed to write configuration: {error}");
        }
        let mut args = self.cli_args.borrow_mut();
        args.push(OsString::from("--config-path"));
        args.push(path.into_os_string());
    }

    fn set_env(&self, key: &str, value: &str) {
        let previous = std::env::var_os(key);
        // Environment mutation is unsafe on edition 2024; overrides are
        // restored in `Drop` while the mutex is still held.
        unsafe { std::env::set_var(key, value) };
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }
        let args = self.cli_args.borrow().clone();
        match Config::load_from_iter(args) {
            Ok(config) => *self.loaded.borrow_mut() = Some(config),
            Err(error) => *self.error.borrow_mut() = Some(error.to_string()),
        }
    }

    fn config(&self) -> Config {
        self.load();
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        match self.loaded.borrow().as_ref() {
            Some(config) => config.clone(),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            if let Some(os_value) = value {
                unsafe { std::env::set_var(&key, os_value) };
            } else {
                unsafe { std::env::remove_var(&key) };
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the carrier name to \"{name}\"")]
fn given_configuration_file(harness: &Harness, name: String) {
    harness.write_config(&format!("carrier_name = \"{name}\"\n"));
}

#[given("the environment overrides the carrier name to \"{name}\"")]
fn given_environment_override(harness: &Harness, name: String) {
    harness.set_env("RETHREAD_CARRIER_NAME", &name);
}

#[given("the environment sets the argument policy to \"{policy}\"")]
fn given_environment_policy(harness: &Harness, policy: String) {
    harness.set_env("RETHREAD_ARGUMENT_POLICY", &policy);
}

#[when("the CLI sets the carrier name to \"{name}\"")]
fn when_cli_override(harness: &Harness, name: String) {
    harness.push_cli_arg("--carrier-name");
    harness.push_cli_arg(name);
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration resolves the carrier name to \"{name}\"")]
fn then_resolved_carrier(harness: &Harness, name: String) {
    assert_eq!(harness.config().carrier_name(), name);
}

#[then("loading the configuration resolves the argument policy to \"{policy}\"")]
fn then_resolved_policy(harness: &Harness, policy: String) {
    let expected = match policy.parse::<ArgumentPolicy>() {
        Ok(parsed) => parsed,
        Err(error) => panic!("invalid expected policy '{policy}': {error}"),
    };
    assert_eq!(harness.config().argument_policy(), expected);
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    let config = harness.config();
    assert_eq!(config.carrier_name(), DEFAULT_CARRIER_NAME);
    assert_eq!(config.inner_constructor(), DEFAULT_INNER_CONSTRUCTOR);
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), default_log_format());
    assert_eq!(config.jobs(), 1);
}

#[scenario(path = "tests/features/configuration_precedence.feature")]
fn configuration_precedence(#[from(harness)] harness: Harness) {
    let _ = harness;
}
