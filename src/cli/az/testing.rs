// src/cli/az/testing.rs
//! Scripted `az` runner for command tests.

use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;

use super::{AzOutput, AzRunner, AzureCli};

#[derive(Default)]
struct Script {
    rules: Vec<(Vec<String>, AzOutput)>,
    calls: Vec<Vec<String>>,
}

/// Answers each call with the first rule whose prefix matches its arguments.
/// Unmatched calls fail. Clones share the same script and call log.
#[derive(Clone, Default)]
pub(crate) struct ScriptedRunner {
    inner: Rc<RefCell<Script>>,
}

impl ScriptedRunner {
    pub fn on(self, prefix: &[&str], output: AzOutput) -> Self {
        let prefix = prefix.iter().map(|s| s.to_string()).collect();
        self.inner.borrow_mut().rules.push((prefix, output));
        self
    }

    pub fn ok(self, prefix: &[&str], stdout: &str) -> Self {
        self.on(
            prefix,
            AzOutput {
                success: true,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        )
    }

    pub fn fail(self, prefix: &[&str], stderr: &str) -> Self {
        self.on(
            prefix,
            AzOutput {
                success: false,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        )
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.inner.borrow().calls.clone()
    }

    pub fn calls_starting_with(&self, prefix: &[&str]) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|call| starts_with(call, prefix))
            .collect()
    }

    pub fn cli(&self) -> AzureCli {
        AzureCli::with_runner(Box::new(self.clone()), None)
    }
}

fn starts_with<S: AsRef<str>>(args: &[String], prefix: &[S]) -> bool {
    args.len() >= prefix.len() && args.iter().zip(prefix).all(|(a, p)| a == p.as_ref())
}

impl AzRunner for ScriptedRunner {
    fn run(&self, args: &[String]) -> Result<AzOutput> {
        let mut script = self.inner.borrow_mut();
        script.calls.push(args.to_vec());
        let output = script
            .rules
            .iter()
            .find(|(prefix, _)| starts_with(args, prefix))
            .map(|(_, out)| out.clone())
            .unwrap_or_else(|| AzOutput {
                success: false,
                stdout: String::new(),
                stderr: format!("unexpected az call: {}", args.join(" ")),
            });
        Ok(output)
    }
}
