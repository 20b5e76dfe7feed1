// Export orchestration
//
// One export call owns one scan: it builds a fresh symbol table, discovers
// modules, fans extraction out across the rayon pool, regroups by context
// and publishes the document with an all-or-nothing write. The previously
// published document survives any failure. DocPublisher serializes
// concurrent regeneration requests against one output target.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extractor::{
    CommandExtractor, DomainEventExtractor, EventSubscriberExtractor, ExternalCallExtractor,
    QueryExtractor,
};
use crate::model::{ArchOutput, ContextOutput, MetaOutput, ModuleOutput};
use crate::scanner::{ModuleInfo, ModuleScanner};
use crate::symbols::{discover_files, SymbolTable};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Outcome of a published export
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub path: PathBuf,
    pub contexts: usize,
    pub modules: usize,
    /// Files skipped during symbol registration, with reasons
    pub skipped: Vec<(PathBuf, String)>,
}

impl ExportReport {
    pub fn summary(&self) -> String {
        format!(
            "Exported {} contexts, {} modules to {}",
            self.contexts,
            self.modules,
            self.path.display()
        )
    }
}

/// Runs the extraction pipeline and assembles the document
pub struct ArchExporter {
    config: Config,
    verbose: bool,
}

impl ArchExporter {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            verbose: false,
        }
    }

    /// Show a progress bar while the symbol table is built
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a full scan and return the complete document. The symbol table
    /// is scoped to this call and discarded with it.
    pub fn export(&self, root: &Path) -> Result<ArchOutput> {
        let (arch, _skipped) = self.export_with_notes(root)?;
        Ok(arch)
    }

    fn export_with_notes(&self, root: &Path) -> Result<(ArchOutput, Vec<(PathBuf, String)>)> {
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }
        let root = root.canonicalize()?;

        let table = self.build_table(&root)?;

        let scanner = ModuleScanner::new(
            &table,
            &self.config.conventions,
            &self.config.analysis.exclude_contexts,
        );
        let modules = scanner.scan(&root);

        // Per-module extraction is a pure function of (module, table);
        // order during the fan-out carries no meaning.
        let outputs: Vec<(String, ModuleOutput)> = modules
            .par_iter()
            .map(|module| (module.context.clone(), self.module_output(module, &table)))
            .collect();

        let mut grouped: BTreeMap<String, Vec<ModuleOutput>> = BTreeMap::new();
        for (context, output) in outputs {
            grouped.entry(context).or_default().push(output);
        }

        // BTreeMap iteration yields contexts ascending byte-wise
        let contexts = grouped
            .into_iter()
            .map(|(name, modules)| ContextOutput { name, modules })
            .collect();

        let arch = ArchOutput {
            contexts,
            meta: MetaOutput {
                generated_at: Utc::now(),
                company: self.config.project.company.clone(),
                project: self.config.project.name.clone(),
            },
        };

        Ok((arch, table.skipped().to_vec()))
    }

    /// Run a full scan and atomically replace the output document.
    /// Nothing is written when extraction, serialization or validation
    /// fails.
    pub fn export_to_file(&self, root: &Path) -> Result<ExportReport> {
        let (arch, skipped) = self.export_with_notes(root)?;

        let json = if self.config.output.pretty {
            serde_json::to_string_pretty(&arch)?
        } else {
            serde_json::to_string(&arch)?
        };

        validate_document(&json, &arch)?;

        let path = &self.config.output.path;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // single all-or-nothing replacement of the published document
        let tmp = temp_sibling(path);
        std::fs::write(&tmp, &json)?;
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }

        Ok(ExportReport {
            path: path.clone(),
            contexts: arch.contexts.len(),
            modules: arch.module_count(),
            skipped,
        })
    }

    fn build_table(&self, root: &Path) -> Result<SymbolTable> {
        let files = discover_files(root, &self.config.analysis.exclude)?;

        let progress = if self.verbose {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut table = SymbolTable::new();
        for file in &files {
            if let Some(pb) = &progress {
                let msg = file
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();
                pb.set_message(msg);
                pb.inc(1);
            }
            table.register_file(file);
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Symbol table complete");
        }

        Ok(table)
    }

    fn module_output(&self, module: &ModuleInfo, table: &SymbolTable) -> ModuleOutput {
        let conventions = &self.config.conventions;

        ModuleOutput {
            name: module.module.clone(),
            description: module.description.clone(),
            commands: CommandExtractor::new(table, conventions).extract(module),
            queries: QueryExtractor::new(table, conventions).extract(module),
            domain_events: DomainEventExtractor::new(table, conventions).extract(module),
            event_subscribers: EventSubscriberExtractor::new(table, conventions).extract(module),
            external_calls: ExternalCallExtractor::new(table, conventions).extract(module),
        }
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .unwrap_or_default()
        .to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Re-parse the serialized document and verify its structural contract:
/// a faithful round trip, contexts in ascending byte-wise order, and no
/// empty optional collections. A failure here fails the export.
fn validate_document(json: &str, arch: &ArchOutput) -> Result<()> {
    let parsed: ArchOutput = serde_json::from_str(json)
        .map_err(|e| Error::validation(format!("document does not round-trip: {}", e)))?;

    if &parsed != arch {
        return Err(Error::validation(
            "re-parsed document differs from the extracted model",
        ));
    }

    let value: serde_json::Value = serde_json::from_str(json)?;
    let contexts = value
        .get("contexts")
        .and_then(|c| c.as_array())
        .ok_or_else(|| Error::validation("missing contexts array"))?;

    let names: Vec<&str> = contexts
        .iter()
        .filter_map(|c| c.get("name").and_then(|n| n.as_str()))
        .collect();
    if names.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(Error::validation("contexts are not sorted by name"));
    }

    for context in contexts {
        for module in context
            .get("modules")
            .and_then(|m| m.as_array())
            .map(|m| m.as_slice())
            .unwrap_or_default()
        {
            for key in [
                "commands",
                "queries",
                "domainEvents",
                "eventSubscribers",
                "externalCalls",
            ] {
                if let Some(collection) = module.get(key) {
                    if collection.as_array().is_some_and(|a| a.is_empty()) {
                        return Err(Error::validation(format!(
                            "module {} carries an empty {} collection",
                            module.get("name").and_then(|n| n.as_str()).unwrap_or("?"),
                            key
                        )));
                    }
                }
            }
        }
    }

    Ok(())
}

/// Guards a published document against overlapping regenerations: at most
/// one export runs per target at a time, later callers queue behind the
/// in-flight one and receive their own run's outcome.
pub struct DocPublisher {
    exporter: ArchExporter,
    root: PathBuf,
    lock: Mutex<()>,
}

impl DocPublisher {
    pub fn new(exporter: ArchExporter, root: PathBuf) -> Self {
        Self {
            exporter,
            root,
            lock: Mutex::new(()),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.exporter.config.output.path
    }

    /// Regenerate and replace the published document
    pub fn publish(&self) -> Result<ExportReport> {
        let _guard = self
            .lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.exporter.export_to_file(&self.root)
    }
}
