//! Table footer row.

use serde::{Deserialize, Serialize};

/// Column span used when none is given.
pub const DEFAULT_COLSPAN: u32 = 6;

/// A footer with one cell spanning the table width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFooter {
    /// Columns spanned by the footer cell
    #[serde(default = "default_colspan")]
    pub colspan: u32,
    /// Cell content
    #[serde(default)]
    pub content: Option<String>,
}

const fn default_colspan() -> u32 {
    DEFAULT_COLSPAN
}

impl Default for TableFooter {
    fn default() -> Self {
        Self {
            colspan: DEFAULT_COLSPAN,
            content: None,
        }
    }
}

/// One rendered footer cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterCell {
    /// Columns spanned
    pub colspan: u32,
    /// Content
    pub content: Option<String>,
}

/// A rendered footer: a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    /// Cells of the only row
    pub row: Vec<FooterCell>,
}

impl TableFooter {
    /// Create a footer spanning the default column count.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column span.
    #[must_use]
    pub const fn colspan(mut self, colspan: u32) -> Self {
        self.colspan = colspan;
        self
    }

    /// Set the content.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Render the footer row.
    #[must_use]
    pub fn view(&self) -> FooterView {
        FooterView {
            row: vec![FooterCell {
                colspan: self.colspan,
                content: self.content.clone(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colspan() {
        let view = TableFooter::new().view();
        assert_eq!(view.row.len(), 1);
        assert_eq!(view.row[0].colspan, 6);
    }

    #[test]
    fn test_custom_colspan_and_content() {
        let view = TableFooter::new().colspan(3).content("Total: 42").view();
        assert_eq!(
            view.row,
            vec![FooterCell {
                colspan: 3,
                content: Some("Total: 42".to_string())
            }]
        );
    }

    #[test]
    fn test_deserialize_defaults_colspan() {
        let footer: TableFooter = serde_json::from_str("{}").unwrap();
        assert_eq!(footer.colspan, DEFAULT_COLSPAN);
    }
}
