use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::command::{CommandEntry, CommandList};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UrlPattern {
    // Bare domain rewritten to `https://<domain>/`, matched as a literal prefix.
    Prefix(String),
    Glob(String),
}

fn glob_meta_re() -> &'static Regex {
    static RE_GLOB_META: OnceLock<Regex> = OnceLock::new();
    RE_GLOB_META.get_or_init(|| Regex::new(r"[*?\[\]{}]").unwrap())
}

pub fn normalize_pattern(pattern: &str) -> UrlPattern {
    if glob_meta_re().is_match(pattern) || pattern.contains("://") {
        UrlPattern::Glob(pattern.to_string())
    } else {
        UrlPattern::Prefix(format!("https://{pattern}/"))
    }
}

#[derive(Clone, Debug)]
pub enum CompiledPattern {
    Prefix(String),
    Glob(GlobMatcher),
    Invalid,
}

impl CompiledPattern {
    pub fn compile(pattern: &str) -> Self {
        match normalize_pattern(pattern) {
            UrlPattern::Prefix(prefix) => Self::Prefix(prefix),
            UrlPattern::Glob(glob) => match GlobBuilder::new(&glob).literal_separator(true).build() {
                Ok(compiled) => Self::Glob(compiled.compile_matcher()),
                Err(err) => {
                    debug!(pattern = %glob, error = %err, "ignoring malformed url pattern");
                    Self::Invalid
                }
            },
        }
    }

    pub fn is_match(&self, url: &str) -> bool {
        match self {
            Self::Prefix(prefix) => url.starts_with(prefix.as_str()),
            Self::Glob(matcher) => matcher.is_match(url),
            Self::Invalid => false,
        }
    }
}

pub fn url_matches(pattern: &str, url: &str) -> bool {
    CompiledPattern::compile(pattern).is_match(url)
}

pub fn query_matches(entry: &CommandEntry, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    entry.command.command.to_lowercase().starts_with(&query)
        || entry.command.title.to_lowercase().contains(&query)
}

// Commands in storage order with their url patterns compiled once. Filtering
// still happens per call against the live url and query.
#[derive(Clone, Debug, Default)]
pub struct CommandSet {
    entries: Vec<(CommandEntry, CompiledPattern)>,
}

impl CommandSet {
    pub fn new(commands: CommandList) -> Self {
        Self {
            entries: commands
                .into_iter()
                .map(|entry| {
                    let pattern = CompiledPattern::compile(&entry.command.url);
                    (entry, pattern)
                })
                .collect(),
        }
    }

    pub fn matches(&self, url: &str, query: &str) -> CommandList {
        self.entries
            .iter()
            .filter(|(entry, pattern)| pattern.is_match(url) && query_matches(entry, query))
            .map(|(entry, _)| entry.clone())
            .collect()
    }

    // Drops commands whose url is literally the page url.
    pub fn visible_candidates(&self, url: &str, query: &str) -> CommandList {
        let mut candidates = self.matches(url, query);
        candidates.retain(|entry| entry.command.url != url);
        candidates
    }
}

pub fn matches(commands: &[CommandEntry], url: &str, query: &str) -> CommandList {
    CommandSet::new(commands.to_vec()).matches(url, query)
}

pub fn visible_candidates(commands: &[CommandEntry], url: &str, query: &str) -> CommandList {
    CommandSet::new(commands.to_vec()).visible_candidates(url, query)
}
