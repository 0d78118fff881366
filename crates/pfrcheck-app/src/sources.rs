//! Reading rule files and context files from disk.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use pfrcheck_domain::MapContext;
use pfrcheck_rules::{RuleSet, RuleSource};

/// A rule file's contents, kept alongside its path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedSource {
    pub path: Utf8PathBuf,
    pub text: String,
}

impl LoadedSource {
    pub fn as_rule_source(&self) -> RuleSource<'_> {
        RuleSource::new(self.path.as_str(), &self.text)
    }
}

/// Read rule files in the given order.
pub fn read_rule_files(paths: &[Utf8PathBuf]) -> anyhow::Result<Vec<LoadedSource>> {
    paths
        .iter()
        .map(|path| -> anyhow::Result<LoadedSource> {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read rule file {path}"))?;
            Ok(LoadedSource {
                path: path.clone(),
                text,
            })
        })
        .collect()
}

/// Read and merge rule files into one rule set.
pub fn load_rule_files(paths: &[Utf8PathBuf]) -> anyhow::Result<RuleSet> {
    let loaded = read_rule_files(paths)?;
    let sources: Vec<RuleSource<'_>> = loaded.iter().map(LoadedSource::as_rule_source).collect();
    let set = pfrcheck_rules::load_many(&sources).context("load rules")?;
    tracing::info!(files = loaded.len(), rules = set.len(), "loaded rule set");
    Ok(set)
}

/// Read a YAML context file (see [`crate::parse_context_yaml`]).
pub fn read_context_file(path: &Utf8Path) -> anyhow::Result<MapContext> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read context file {path}"))?;
    crate::context::parse_context_yaml(&text).with_context(|| format!("load context {path}"))
}
