//! Structure-preserving clip documents
//!
//! Uses `toml_edit` so that rewriting a curve's `path` changes only that
//! string, keeping comments, key order and keyframe formatting intact.

use crate::category::CurveCategory;
use rebind_core::{ContentHash, RebindError, Result, DEFAULT_ATTRIBUTE};
use std::fmt;
use toml_edit::TableLike;

/// A curve's target as stored in the clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveBinding {
    pub category: CurveCategory,
    /// Position of the curve within its category array
    pub index: usize,
    pub path: String,
    pub attribute: String,
}

/// A staged `path` write, not yet part of the document
#[derive(Debug, Clone)]
struct PendingWrite {
    category: CurveCategory,
    index: usize,
    path: String,
}

/// A parsed clip that can be patched curve by curve.
///
/// Writes go through two steps: `set_path` stages a new value and
/// `apply_modified_properties` commits all staged values into the document.
pub struct ClipDocument {
    doc: toml_edit::DocumentMut,
    pending: Vec<PendingWrite>,
    saved_hash: ContentHash,
}

impl ClipDocument {
    /// Parse a clip document
    pub fn from_str(content: &str) -> Result<Self> {
        let doc: toml_edit::DocumentMut = content.parse()?;
        for category in CurveCategory::ALL {
            if let Some(item) = doc.get(category.key()) {
                if !item.is_array_of_tables() && !item.is_array() {
                    return Err(RebindError::ClipError(format!(
                        "'{}' must be an array of curves",
                        category.key()
                    )));
                }
            }
        }
        Ok(Self {
            doc,
            pending: Vec::new(),
            saved_hash: ContentHash::from_str(content),
        })
    }

    /// The `name` field, if the clip declares one
    pub fn name(&self) -> Option<&str> {
        self.doc.get("name").and_then(|item| item.as_str())
    }

    /// Number of curves stored under a category
    pub fn curve_count(&self, category: CurveCategory) -> usize {
        match self.doc.get(category.key()) {
            Some(item) => item
                .as_array_of_tables()
                .map(|a| a.len())
                .or_else(|| item.as_array().map(|a| a.len()))
                .unwrap_or(0),
            None => 0,
        }
    }

    /// Every curve binding, category by category in `CurveCategory::ALL` order.
    ///
    /// A curve without an `attribute` string is reported with the default
    /// attribute; a curve without a `path` string is an error.
    pub fn bindings(&self) -> Result<Vec<CurveBinding>> {
        let mut out = Vec::new();
        for category in CurveCategory::ALL {
            for index in 0..self.curve_count(category) {
                let element = self.element(category, index).ok_or_else(|| {
                    RebindError::ClipError(format!(
                        "'{}' element {} is not a table",
                        category.key(),
                        index
                    ))
                })?;
                let path = element
                    .get("path")
                    .and_then(|item| item.as_str())
                    .ok_or_else(|| RebindError::MissingPath {
                        category: category.key().to_string(),
                        index,
                    })?;
                let attribute = element
                    .get("attribute")
                    .and_then(|item| item.as_str())
                    .unwrap_or(DEFAULT_ATTRIBUTE);

                out.push(CurveBinding {
                    category,
                    index,
                    path: path.to_string(),
                    attribute: attribute.to_string(),
                });
            }
        }
        Ok(out)
    }

    /// Committed `path` of one curve
    pub fn path_at(&self, category: CurveCategory, index: usize) -> Option<&str> {
        self.element(category, index)?
            .get("path")
            .and_then(|item| item.as_str())
    }

    /// Stage a new `path` for one curve
    pub fn set_path(&mut self, category: CurveCategory, index: usize, path: &str) -> Result<()> {
        if self.path_at(category, index).is_none() {
            return Err(RebindError::MissingPath {
                category: category.key().to_string(),
                index,
            });
        }
        self.pending.push(PendingWrite {
            category,
            index,
            path: path.to_string(),
        });
        Ok(())
    }

    /// Whether writes are staged but not applied
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Commit staged writes into the document, returning how many were applied
    pub fn apply_modified_properties(&mut self) -> Result<usize> {
        let pending = std::mem::take(&mut self.pending);
        let count = pending.len();
        for write in pending {
            let element = self.element_mut(write.category, write.index).ok_or_else(|| {
                RebindError::MissingPath {
                    category: write.category.key().to_string(),
                    index: write.index,
                }
            })?;
            let value = element
                .get_mut("path")
                .and_then(|item| item.as_value_mut())
                .ok_or_else(|| RebindError::MissingPath {
                    category: write.category.key().to_string(),
                    index: write.index,
                })?;
            replace_str(value, &write.path);
        }
        Ok(count)
    }

    /// Whether the committed document matches the text last loaded or saved
    pub fn is_unchanged(&self) -> bool {
        ContentHash::from_str(&self.to_string()) == self.saved_hash
    }

    /// Record the current text as persisted
    pub fn mark_saved(&mut self) {
        self.saved_hash = ContentHash::from_str(&self.to_string());
    }

    fn element(&self, category: CurveCategory, index: usize) -> Option<&dyn TableLike> {
        let item = self.doc.get(category.key())?;
        if let Some(tables) = item.as_array_of_tables() {
            return tables.get(index).map(|t| t as &dyn TableLike);
        }
        item.as_array()?
            .get(index)?
            .as_inline_table()
            .map(|t| t as &dyn TableLike)
    }

    fn element_mut(&mut self, category: CurveCategory, index: usize) -> Option<&mut dyn TableLike> {
        let item = self.doc.get_mut(category.key())?;
        if item.is_array_of_tables() {
            return item
                .as_array_of_tables_mut()?
                .get_mut(index)
                .map(|t| t as &mut dyn TableLike);
        }
        item.as_array_mut()?
            .get_mut(index)?
            .as_inline_table_mut()
            .map(|t| t as &mut dyn TableLike)
    }
}

/// Serializes the document with its original formatting
impl fmt::Display for ClipDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.doc)
    }
}

/// Replace a string value in place, keeping its surrounding whitespace and comments
fn replace_str(value: &mut toml_edit::Value, s: &str) {
    let decor = value.decor().clone();
    *value = toml_edit::Value::from(s);
    *value.decor_mut() = decor;
}
