use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

use crate::command::{CommandEntry, CommandList, StoredCommand};
use crate::config::EngineConfig;
use crate::error::Result;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["browser", "storage", "local"], js_name = get)]
    async fn storage_get(keys: JsValue) -> std::result::Result<JsValue, JsValue>;
    #[wasm_bindgen(catch, js_namespace = ["browser", "storage", "local"], js_name = set)]
    async fn storage_set(items: JsValue) -> std::result::Result<JsValue, JsValue>;
}

#[allow(async_fn_in_trait)]
pub trait CommandStore {
    async fn load_all(&self) -> Result<CommandList>;
    async fn save_all(&self, commands: &[CommandEntry]) -> Result<()>;

    async fn delete(&self, keyword: &str) -> Result<()> {
        let mut commands = self.load_all().await?;
        commands.retain(|entry| entry.name != keyword);
        self.save_all(&commands).await
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct StorageSnapshot {
    commands: Option<Vec<StoredCommand>>,
    settings: Option<String>,
}

#[derive(Serialize)]
struct CommandsRecord {
    commands: Vec<StoredCommand>,
}

// `browser.storage.local`, commands under `commands`, settings JSON under
// `settings`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl BrowserStore {
    async fn snapshot(keys: &[&str]) -> Result<StorageSnapshot> {
        let keys = serde_wasm_bindgen::to_value(keys)?;
        let raw = storage_get(keys).await?;
        Ok(serde_wasm_bindgen::from_value(raw)?)
    }

    pub async fn init(&self) -> Result<()> {
        if Self::snapshot(&["commands"]).await?.commands.is_none() {
            debug!("seeding empty command list");
            self.save_all(&[]).await?;
        }
        Ok(())
    }

    pub async fn load_config(&self) -> Result<EngineConfig> {
        match Self::snapshot(&["settings"]).await?.settings {
            Some(raw) => EngineConfig::from_json(&raw),
            None => Ok(EngineConfig::default()),
        }
    }
}

impl CommandStore for BrowserStore {
    async fn load_all(&self) -> Result<CommandList> {
        let commands: CommandList = Self::snapshot(&["commands"])
            .await?
            .commands
            .unwrap_or_default()
            .into_iter()
            .map(CommandEntry::from)
            .collect();
        info!(count = commands.len(), "loaded commands");
        Ok(commands)
    }

    async fn save_all(&self, commands: &[CommandEntry]) -> Result<()> {
        let record = CommandsRecord {
            commands: commands.iter().map(StoredCommand::from).collect(),
        };
        let items = record.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;
        storage_set(items).await?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<StoredCommand>>,
}

impl MemoryStore {
    pub fn with_commands(commands: &[CommandEntry]) -> Self {
        Self {
            records: RefCell::new(commands.iter().map(StoredCommand::from).collect()),
        }
    }
}

impl CommandStore for MemoryStore {
    async fn load_all(&self) -> Result<CommandList> {
        Ok(self
            .records
            .borrow()
            .iter()
            .cloned()
            .map(CommandEntry::from)
            .collect())
    }

    async fn save_all(&self, commands: &[CommandEntry]) -> Result<()> {
        *self.records.borrow_mut() = commands.iter().map(StoredCommand::from).collect();
        Ok(())
    }
}
