//! Static symbol dataset loading, validation and queries.
//!
//! # Responsibility
//! - Load the symbol/category bundle once at startup.
//! - Enforce cross-record invariants before anything reads the data.
//! - Serve category listings, stats and the search filter.
//!
//! # Invariants
//! - Symbol ids and category ids are unique.
//! - Every symbol references an existing category.
//! - The dataset is immutable after construction.

mod search;

use crate::model::symbol::{Category, Symbol};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

pub use search::SymbolFilter;

/// Key used by [`SymbolDataset::category_counts`] for the grand total.
pub const ALL_CATEGORIES_KEY: &str = "all";

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Dataset load and integrity failures.
#[derive(Debug)]
pub enum DatasetError {
    Io {
        path: String,
        source: std::io::Error,
    },
    /// JSON is malformed or a record failed validation (bad code point, glyph mismatch).
    Parse(serde_json::Error),
    DuplicateSymbolId(String),
    DuplicateCategoryId(String),
    UnknownCategory {
        symbol_id: String,
        category_id: String,
    },
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read dataset `{path}`: {source}"),
            Self::Parse(err) => write!(f, "invalid dataset: {err}"),
            Self::DuplicateSymbolId(id) => write!(f, "duplicate symbol id `{id}`"),
            Self::DuplicateCategoryId(id) => write!(f, "duplicate category id `{id}`"),
            Self::UnknownCategory {
                symbol_id,
                category_id,
            } => write!(
                f,
                "symbol `{symbol_id}` references unknown category `{category_id}`"
            ),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Wire shape of the exported bundle. Metadata keys are optional.
#[derive(Deserialize)]
struct DatasetDocument {
    categories: Vec<Category>,
    symbols: Vec<Symbol>,
}

/// One category with its symbols in dataset order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryListing<'a> {
    pub category: &'a Category,
    pub symbols: Vec<&'a Symbol>,
    pub count: usize,
}

/// Per-category symbol count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// Aggregate dataset statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    pub total_categories: usize,
    pub total_symbols: usize,
    pub symbols_by_category: Vec<CategoryCount>,
}

/// Validated, read-only symbol catalogue.
#[derive(Debug, Clone)]
pub struct SymbolDataset {
    categories: Vec<Category>,
    symbols: Vec<Symbol>,
    symbol_index: HashMap<String, usize>,
    category_index: HashMap<String, usize>,
}

impl SymbolDataset {
    /// Builds a dataset from already decoded records.
    ///
    /// # Errors
    /// - Duplicate symbol/category ids.
    /// - Symbols whose category does not exist.
    pub fn from_parts(categories: Vec<Category>, symbols: Vec<Symbol>) -> DatasetResult<Self> {
        let mut category_index = HashMap::with_capacity(categories.len());
        for (position, category) in categories.iter().enumerate() {
            if category_index
                .insert(category.id.clone(), position)
                .is_some()
            {
                return Err(DatasetError::DuplicateCategoryId(category.id.clone()));
            }
        }

        let mut symbol_index = HashMap::with_capacity(symbols.len());
        for (position, symbol) in symbols.iter().enumerate() {
            if !category_index.contains_key(&symbol.category) {
                return Err(DatasetError::UnknownCategory {
                    symbol_id: symbol.id.clone(),
                    category_id: symbol.category.clone(),
                });
            }
            if symbol_index.insert(symbol.id.clone(), position).is_some() {
                return Err(DatasetError::DuplicateSymbolId(symbol.id.clone()));
            }
        }

        Ok(Self {
            categories,
            symbols,
            symbol_index,
            category_index,
        })
    }

    /// Parses and validates a JSON bundle.
    pub fn from_json_str(json: &str) -> DatasetResult<Self> {
        let document: DatasetDocument = serde_json::from_str(json)?;
        Self::from_parts(document.categories, document.symbols)
    }

    /// Reads, parses and validates a JSON bundle from disk.
    ///
    /// # Side effects
    /// - Emits `dataset_load` events with counts and duration.
    pub fn from_json_file(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        info!("event=dataset_load module=dataset status=start");

        let result = std::fs::read_to_string(path)
            .map_err(|source| DatasetError::Io {
                path: path.display().to_string(),
                source,
            })
            .and_then(|json| Self::from_json_str(&json));

        match &result {
            Ok(dataset) => info!(
                "event=dataset_load module=dataset status=ok duration_ms={} categories={} symbols={}",
                started_at.elapsed().as_millis(),
                dataset.categories.len(),
                dataset.symbols.len()
            ),
            Err(err) => error!(
                "event=dataset_load module=dataset status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn symbol(&self, id: &str) -> Option<&Symbol> {
        self.symbol_index.get(id).map(|&position| &self.symbols[position])
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.category_index
            .get(id)
            .map(|&position| &self.categories[position])
    }

    /// Symbols of one category in dataset order. Unknown ids yield nothing.
    pub fn symbols_in_category<'a>(
        &'a self,
        category_id: &'a str,
    ) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols
            .iter()
            .filter(move |symbol| symbol.category == category_id)
    }

    /// Category record plus its symbols, or `None` for an unknown id.
    pub fn category_listing(&self, category_id: &str) -> Option<CategoryListing<'_>> {
        let category = self.category(category_id)?;
        let symbols = self
            .symbols
            .iter()
            .filter(|symbol| symbol.category == category.id)
            .collect::<Vec<_>>();
        Some(CategoryListing {
            category,
            count: symbols.len(),
            symbols,
        })
    }

    /// Symbol counts keyed by category id, plus [`ALL_CATEGORIES_KEY`].
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = self
            .categories
            .iter()
            .map(|category| (category.id.clone(), 0))
            .collect::<BTreeMap<_, _>>();
        for symbol in &self.symbols {
            if let Some(count) = counts.get_mut(&symbol.category) {
                *count += 1;
            }
        }
        counts.insert(ALL_CATEGORIES_KEY.to_string(), self.symbols.len());
        counts
    }

    pub fn stats(&self) -> DatasetStats {
        let counts = self.category_counts();
        DatasetStats {
            total_categories: self.categories.len(),
            total_symbols: self.symbols.len(),
            symbols_by_category: self
                .categories
                .iter()
                .map(|category| CategoryCount {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    count: counts.get(&category.id).copied().unwrap_or(0),
                })
                .collect(),
        }
    }

    /// Applies `filter`, preserving dataset order.
    pub fn search<'a>(&'a self, filter: &SymbolFilter) -> Vec<&'a Symbol> {
        self.symbols
            .iter()
            .filter(|symbol| filter.matches(symbol))
            .collect()
    }
}
