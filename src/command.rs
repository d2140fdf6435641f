use serde::{Deserialize, Serialize};

pub const COMMANDS_UPDATED: &str = "COMMANDS_UPDATED";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Command {
    pub command: String,
    pub title: String,
    pub description: String,
    pub replacement: String,
    pub url: String,
}

impl Command {
    pub fn new(
        command: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        replacement: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            title: title.into(),
            description: description.into(),
            replacement: replacement.into(),
            url: url.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: String,
    pub command: Command,
}

impl CommandEntry {
    pub fn new(command: Command) -> Self {
        Self {
            name: command.command.clone(),
            command,
        }
    }
}

pub type CommandList = Vec<CommandEntry>;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StoredCommand {
    pub name: String,
    pub command: String,
    pub title: String,
    pub description: String,
    pub replacement: String,
    pub url: String,
}

impl From<&CommandEntry> for StoredCommand {
    fn from(entry: &CommandEntry) -> Self {
        Self {
            name: entry.name.clone(),
            command: entry.command.command.clone(),
            title: entry.command.title.clone(),
            description: entry.command.description.clone(),
            replacement: entry.command.replacement.clone(),
            url: entry.command.url.clone(),
        }
    }
}

impl From<StoredCommand> for CommandEntry {
    fn from(stored: StoredCommand) -> Self {
        Self {
            name: stored.name,
            command: Command {
                command: stored.command,
                title: stored.title,
                description: stored.description,
                replacement: stored.replacement,
                url: stored.url,
            },
        }
    }
}

// Broadcast sent to every tab when the list changes. The records carry no
// `name`; the keyword doubles as the entry name on the receiving side.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpdateMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<Command>>,
}

impl UpdateMessage {
    pub fn commands_updated(list: &[CommandEntry]) -> Self {
        Self {
            kind: COMMANDS_UPDATED.to_string(),
            commands: Some(
                list.iter()
                    .map(|entry| Command {
                        command: entry.name.clone(),
                        ..entry.command.clone()
                    })
                    .collect(),
            ),
        }
    }

    pub fn into_command_list(self) -> Option<CommandList> {
        if self.kind != COMMANDS_UPDATED {
            return None;
        }
        self.commands
            .map(|commands| commands.into_iter().map(CommandEntry::new).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_record_tolerates_missing_fields() {
        let stored: StoredCommand =
            serde_json::from_str(r#"{ "name": "sig", "command": "sig", "replacement": "Cheers" }"#)
                .unwrap();
        let entry = CommandEntry::from(stored);
        assert_eq!(entry.name, "sig");
        assert_eq!(entry.command.replacement, "Cheers");
        assert_eq!(entry.command.url, "");
    }

    #[test]
    fn update_message_uses_keyword_as_name() {
        let raw = r#"{
            "type": "COMMANDS_UPDATED",
            "commands": [
                { "command": "mail", "title": "Email", "description": "", "replacement": "you@x.com", "url": "github.com" }
            ]
        }"#;
        let message: UpdateMessage = serde_json::from_str(raw).unwrap();
        let list = message.into_command_list().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "mail");
        assert_eq!(list[0].command.title, "Email");
    }

    #[test]
    fn ignores_foreign_messages() {
        let message: UpdateMessage = serde_json::from_str(r#"{ "type": "PING" }"#).unwrap();
        assert!(message.into_command_list().is_none());

        let message: UpdateMessage =
            serde_json::from_str(r#"{ "type": "COMMANDS_UPDATED" }"#).unwrap();
        assert!(message.into_command_list().is_none());
    }

    #[test]
    fn broadcast_serializes_without_name() {
        let list = vec![CommandEntry::new(Command::new("hi", "Hello", "", "Hello!", "*"))];
        let json = serde_json::to_value(UpdateMessage::commands_updated(&list)).unwrap();
        assert_eq!(json["type"], "COMMANDS_UPDATED");
        assert_eq!(json["commands"][0]["command"], "hi");
        assert!(json["commands"][0].get("name").is_none());
    }
}
