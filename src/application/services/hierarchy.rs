//! Hierarchy service
//!
//! Turns two-column pair text into a computed hierarchy and renders it as a
//! relation report, a trace or a nested-map document.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, CsvResultExt, IoResultExt};
use crate::config::Settings;
use crate::domain::{self, DomainError, RelationCalculator, TreeArena, TreeBuilder};

/// One `(parent_label, child_label)` input row.
pub type Pair = (String, String);

/// Default indent width of written JSON documents.
pub const DEFAULT_JSON_INDENT: usize = 4;

/// Service for building hierarchies and rendering their relations.
#[derive(Debug, Clone)]
pub struct HierarchyService {
    delimiter: u8,
    json_indent: usize,
}

impl Default for HierarchyService {
    fn default() -> Self {
        Self {
            delimiter: b',',
            json_indent: DEFAULT_JSON_INDENT,
        }
    }
}

impl HierarchyService {
    /// Create a service from loaded settings.
    pub fn new(settings: &Settings) -> ApplicationResult<Self> {
        Ok(Self {
            delimiter: settings.delimiter_byte()?,
            json_indent: settings.json_indent,
        })
    }

    /// Parse pair rows: no header, exactly two non-empty fields per row.
    #[instrument(level = "debug", skip(self, input))]
    pub fn parse_pairs(&self, input: &str) -> ApplicationResult<Vec<Pair>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .delimiter(self.delimiter)
            .from_reader(input.as_bytes());

        let mut pairs = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result.or_malformed()?;
            let line = record.position().map_or(i + 1, |p| p.line() as usize);
            if record.len() != 2 {
                return Err(DomainError::at_line(
                    line,
                    format!("expected 2 fields, found {}", record.len()),
                )
                .into());
            }
            let (parent, child) = (&record[0], &record[1]);
            if parent.is_empty() || child.is_empty() {
                return Err(DomainError::at_line(line, "empty label").into());
            }
            pairs.push((parent.to_string(), child.to_string()));
        }

        if pairs.is_empty() {
            return Err(DomainError::MalformedInput("no pairs in input".into()).into());
        }
        debug!("parsed {} pairs", pairs.len());
        Ok(pairs)
    }

    /// Build the tree from pair text and compute all relations.
    #[instrument(level = "debug", skip(self, input))]
    pub fn build(&self, input: &str) -> ApplicationResult<TreeArena> {
        let pairs = self.parse_pairs(input)?;
        let mut tree = TreeBuilder::from_pairs(pairs)?;
        RelationCalculator::apply(&mut tree)?;
        debug!("built tree with {} nodes, depth {}", tree.len(), tree.depth());
        Ok(tree)
    }

    /// Relation report for pair text: one label-sorted line per node.
    pub fn report(&self, input: &str) -> ApplicationResult<String> {
        Ok(domain::report(&self.build(input)?))
    }

    /// Pretty JSON of the nested-map document.
    pub fn to_json(&self, tree: &TreeArena) -> ApplicationResult<String> {
        let doc = domain::to_document(tree)?;
        let indent = " ".repeat(self.json_indent);
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
        doc.serialize(&mut ser).map_err(|e| ApplicationError::OperationFailed {
            context: "serialize document".into(),
            source: Box::new(e),
        })?;
        String::from_utf8(buf).map_err(|e| ApplicationError::OperationFailed {
            context: "serialize document".into(),
            source: Box::new(e),
        })
    }

    /// Rebuild a tree from JSON document text.
    pub fn from_json(&self, text: &str) -> ApplicationResult<TreeArena> {
        let doc: Value = serde_json::from_str(text)
            .map_err(|e| DomainError::MalformedInput(format!("invalid JSON: {e}")))?;
        Ok(domain::from_document(&doc)?)
    }

    #[instrument(level = "debug", skip(self, tree))]
    pub fn save_document(&self, tree: &TreeArena, path: &Path) -> ApplicationResult<()> {
        let json = self.to_json(tree)?;
        fs::write(path, json).with_path_context("write document", path)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn load_document(&self, path: &Path) -> ApplicationResult<TreeArena> {
        let text = fs::read_to_string(path).with_path_context("read document", path)?;
        self.from_json(&text)
    }
}

/// Read the whole input from `path`, or from stdin when `path` is None or `-`.
pub fn read_input(path: Option<&Path>) -> ApplicationResult<String> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p).with_path_context("read input", p),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .with_path_context("read input", Path::new("<stdin>"))?;
            Ok(text)
        }
    }
}
