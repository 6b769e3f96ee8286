#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use curriculum_forge::find_project_root;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn project_root() -> PathBuf {
    find_project_root().expect("tests require the project root")
}

pub fn build_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_curriculum-build"))
}

pub fn lint_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_catalogue-lint"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Command with the catalogue/spec environment cleared so host settings do
/// not leak into assertions.
pub fn isolated_command(binary: &Path) -> Command {
    let mut cmd = Command::new(binary);
    cmd.env_remove("CURRICULUM_CATALOGUE")
        .env_remove("CURRICULUM_SPECS")
        .env_remove("CURRICULUM_OUTPUT")
        .env_remove("RUST_LOG")
        .env("CURRICULUM_ROOT", project_root());
    cmd
}

pub fn module(id: &str, level: u8, credit: f64, relevance: Value) -> Value {
    json!({
        "id": id,
        "name": format!("Module {id}"),
        "eqf_level": level,
        "ects_points": credit,
        "role_relevance": relevance
    })
}

pub fn role(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "competence_focus": format!("{name} practice"),
        "key_capabilities": ["Analysis", "Reporting"]
    })
}

pub fn catalogue(modules: Vec<Value>, roles: Vec<Value>) -> Value {
    json!({
        "schema_version": "curriculum_catalogue_v1",
        "modules": modules,
        "roles": roles
    })
}

pub fn spec(id: &str, role: &str, level: u8, ects: f64) -> Value {
    json!({
        "id": id,
        "title": format!("{id} programme"),
        "role_id": role,
        "eqf_level": level,
        "ects": ects,
        "target_audience": "digital_professionals",
        "programme_type": "comprehensive",
        "description": "Fixture programme.",
        "assessment_methods": {
            "primary": "portfolio",
            "components": ["Portfolio", "Case study"],
            "weightings": [60, 40]
        }
    })
}

pub fn write_json(dir: &Path, name: &str, value: &Value) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn json_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    if !dir.is_dir() {
        return Ok(names);
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
