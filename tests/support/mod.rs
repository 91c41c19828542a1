#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use orchid_catalog::CatalogManager;
use orchid_catalog::config::{DATA_ENV, LOG_ENV, PAGE_SIZE_ENV, bundled_dataset_path};
use serde_json::{Value, json};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::NamedTempFile;

/// Small dataset: two genera, one orchid per genus plus a second Cattleya.
pub fn sample_dataset() -> Value {
    let one = |description: &str| json!([{"id": 1, "description": description}]);
    json!({
        "genus": [
            {"id": 1, "description": "Cattleya"},
            {"id": 2, "description": "Phalaenopsis"}
        ],
        "type": one("Epiphyte"),
        "luminosity": one("Bright"),
        "temperature": one("Intermediate"),
        "humidity": one("Medium"),
        "size": one("Medium"),
        "orchid": [
            orchid(1, "Cattleya labiata", 1),
            orchid(2, "Phalaenopsis amabilis", 2),
            orchid(3, "Cattleya walkeriana", 1)
        ]
    })
}

pub fn orchid(id: u64, name: &str, genus: u64) -> Value {
    json!({
        "id": id,
        "description": name,
        "src": format!("images/{id}.jpg"),
        "genus": genus,
        "type": 1,
        "luminosity": 1,
        "temperature": 1,
        "humidity": 1,
        "size": 1
    })
}

pub fn write_dataset(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate dataset file")?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.flush()?;
    Ok(file)
}

pub fn load_manager(value: &Value) -> Result<CatalogManager> {
    let file = write_dataset(value)?;
    CatalogManager::load(file.path())
}

pub fn bundled_manager() -> CatalogManager {
    CatalogManager::load(&bundled_dataset_path()).expect("bundled dataset loads")
}

pub fn catalog_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_orchid-catalog"))
}

/// Command for the CLI with a clean environment pointing at `data`.
pub fn catalog_command(data: &Path) -> Command {
    let mut cmd = Command::new(catalog_binary());
    cmd.env(DATA_ENV, data)
        .env_remove(PAGE_SIZE_ENV)
        .env(LOG_ENV, "warn");
    cmd
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

pub fn stdout_json(output: &Output) -> Result<Value> {
    serde_json::from_slice(&output.stdout).context("CLI stdout is not JSON")
}
