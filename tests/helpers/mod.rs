#![allow(dead_code)] // Test helpers appear unused when compiled independently

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SPAWN_ATTEMPTS: usize = 5;

pub const GROUP_JSON: &str = r#"{
  "id": "/subscriptions/sub/resourceGroups/rg",
  "location": "westeurope",
  "name": "rg",
  "tags": {"env": "prod"},
  "type": "Microsoft.Resources/resourceGroups"
}"#;

pub const STORAGE_ID: &str =
    "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Storage/storageAccounts/st1";
pub const SITE_ID: &str = "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Web/sites/app1";

pub fn resources_json() -> String {
    format!(
        r#"[
  {{"id": "{}", "name": "st1", "type": "Microsoft.Storage/storageAccounts", "location": "westeurope", "tags": {{"env": "dev"}}}},
  {{"id": "{}", "name": "app1", "type": "Microsoft.Web/sites", "location": "westeurope", "tags": null}}
]"#,
        STORAGE_ID, SITE_ID
    )
}

/// A temp working directory with a scripted `az` stand-in that logs every call.
pub struct FakeAz {
    pub dir: TempDir,
    script: PathBuf,
    log: PathBuf,
}

impl FakeAz {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("fake-az");
        let log = dir.path().join("az.log");
        fs::write(dir.path().join("group.json"), GROUP_JSON).unwrap();
        fs::write(dir.path().join("resources.json"), resources_json()).unwrap();
        fs::write(&script, script_body(dir.path(), &log)).unwrap();
        make_executable(&script);
        Self { dir, script, log }
    }

    /// Make `az tag update` fail for the resource with this ID.
    pub fn fail_tag_update(&self, id: &str) {
        fs::write(self.dir.path().join("fail-tag-update"), id).unwrap();
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.dir.path().join(".azadmin.toml"), content).unwrap();
    }

    /// Run azadmin in the temp directory against the fake az.
    pub fn run(&self, args: &[&str]) -> Output {
        for _ in 0..SPAWN_ATTEMPTS {
            let output = self.command(args).output().expect("Failed to run azadmin");
            // Another test thread may still hold the script open for writing
            if String::from_utf8_lossy(&output.stderr).contains("Text file busy") {
                std::thread::sleep(std::time::Duration::from_millis(50));
                continue;
            }
            return output;
        }
        panic!("fake az stayed busy");
    }

    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_azadmin"));
        cmd.args(args)
            .current_dir(self.dir.path())
            .env("AZADMIN_AZ", &self.script)
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env_remove("AZADMIN_SUBSCRIPTION")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Every az invocation so far, one line per call.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }
}

fn script_body(dir: &Path, log: &Path) -> String {
    format!(
        r#"#!/bin/sh
echo "$*" >> "{log}"
fail_id=$(cat "{dir}/fail-tag-update" 2>/dev/null)
case "$*" in
  "group show --name rg "*) cat "{dir}/group.json" ;;
  "group show"*) echo "ERROR: (ResourceGroupNotFound) Resource group could not be found." >&2; exit 3 ;;
  "group create"*) cat "{dir}/group.json" ;;
  "resource list"*) cat "{dir}/resources.json" ;;
  "tag update --resource-id $fail_id "*) echo "ERROR: (AuthorizationFailed) The client does not have authorization." >&2; exit 1 ;;
  "tag update"*) exit 0 ;;
  "account show"*) echo '{{"id": "sub", "name": "Test Subscription", "tenantId": "tenant"}}' ;;
  "account management-group show --name mg-existing "*) exit 0 ;;
  "account management-group show"*) echo "ERROR: (NotFound)" >&2; exit 3 ;;
  "account management-group create --name mg-bad "*) echo "ERROR: (AuthorizationFailed)" >&2; exit 1 ;;
  "account management-group create"*) exit 0 ;;
  *) echo "unexpected az call: $*" >&2; exit 2 ;;
esac
"#,
        log = log.display(),
        dir = dir.display()
    )
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}
