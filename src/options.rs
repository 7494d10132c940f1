//! Key/value option storage for the database version.
//!
//! Mirrors the host's options table: string keys, loosely typed values.
//! Numeric options written by the host often come back as strings, so the
//! integer accessors accept both forms.

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::files::write_atomic;

pub trait OptionStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;

    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    fn get_u32(&self, key: &str) -> Result<Option<u32>> {
        match self.get(key)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => parse_u32(&value)
                .map(Some)
                .with_context(|| format!("Option {} is not a version number: {}", key, value)),
        }
    }

    fn set_u32(&mut self, key: &str, value: u32) -> Result<()> {
        self.set(key, Value::from(value))
    }
}

fn parse_u32(value: &Value) -> Result<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .context("out of range"),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => Ok(s.trim().parse()?),
        _ => anyhow::bail!("unexpected type"),
    }
}

/// Options held in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryOptionStore {
    values: BTreeMap<String, Value>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OptionStore for MemoryOptionStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Options persisted as a JSON object on disk.
///
/// The file is read once on open. Every `set` rewrites the whole file via a
/// temporary sibling and a rename, so readers never observe a partial write.
#[derive(Debug)]
pub struct JsonOptionStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonOptionStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read options file: {:?}", path))?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse options file: {:?}", path))?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let json =
            serde_json::to_string_pretty(&self.values).context("Failed to serialize options")?;
        write_atomic(&self.path, json.as_bytes())
    }
}

impl OptionStore for JsonOptionStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let previous = self.values.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}
