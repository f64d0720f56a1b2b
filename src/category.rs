//! Category name translation from Personal Capital to Monarch.
//!
//! A [`CategoryTranslator`] is built once per run from a mapping table and a
//! case-sensitivity flag. Lookups never fail: unknown categories pass through
//! unchanged.

use std::collections::HashMap;

/// Built-in Personal Capital → Monarch category table.
///
/// Used whenever no valid mapping configuration is available.
pub static DEFAULT_CATEGORY_MAPPINGS: &[(&str, &str)] = &[
    // Family and personal care
    ("Child", "Kids Gear & Supplies"),
    ("Clothing/Shoes", "Clothing"),
    ("Healthcare/Medical", "Medical"),
    ("Pets/Pet Care", "Pets"),
    // Transportation
    ("Automotive", "Auto Maintenance"),
    ("Gasoline/Fuel", "Gas"),
    ("Parking", "Parking & Tolls"),
    // Entertainment and lifestyle
    ("Travel", "Travel & Vacation"),
    ("Hobbies", "Poker"),
    ("Entertainment", "Entertainment & Recreation"),
    // Financial
    ("Credit Card Payments", "Credit Card Payment"),
    ("Transfers", "Transfer"),
    ("Service Charges/Fees", "Service Charges"),
    ("ATM/Cash", "Cash & ATM"),
    // Income
    ("Paychecks/Salary", "Paychecks"),
    ("Dividends Received", "Dividends & Capital Gains"),
    ("Investment Income", "Dividends & Capital Gains"),
    ("Stocks", "RSU"),
    // Housing and utilities
    ("Mortgages", "Mortgage"),
    ("Cable/Satellite", "Internet & Cable"),
    ("Telephone", "Phone"),
    // Savings and contributions
    ("Retirement Contributions", "Retirement Contribution"),
    ("529 Contributions", "529 Contribution"),
    ("Portfolio Management", "Service Charges"),
    // Other
    ("Charitable Giving", "Charity"),
];

/// Source category → destination category pairs, in document order.
pub type MappingTable = Vec<(String, String)>;

/// Returns an owned copy of [`DEFAULT_CATEGORY_MAPPINGS`].
pub fn default_mapping_table() -> MappingTable {
    DEFAULT_CATEGORY_MAPPINGS
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

/// Resolves source category names to destination category names.
///
/// # Lookup order
///
/// 1. Exact match against the table as provided.
/// 2. Case-insensitive mode only: the lower-cased category against a
///    lower-cased copy of the table built at construction time.
/// 3. Otherwise the category is returned unchanged.
///
/// Entries are applied in table order, so when two keys collide (exactly, or
/// after lower-casing) the later entry wins.
#[derive(Debug, Clone)]
pub struct CategoryTranslator {
    table: HashMap<String, String>,

    /// Lower-cased keys; `None` in case-sensitive mode.
    folded: Option<HashMap<String, String>>,
}

impl CategoryTranslator {
    /// Creates a translator over `table`.
    pub fn new(table: MappingTable, case_sensitive: bool) -> Self {
        let folded = if case_sensitive {
            None
        } else {
            Some(
                table
                    .iter()
                    .map(|(from, to)| (from.to_lowercase(), to.clone()))
                    .collect(),
            )
        };

        CategoryTranslator {
            table: table.into_iter().collect(),
            folded,
        }
    }

    /// Creates a case-sensitive translator over the built-in table.
    pub fn with_defaults() -> Self {
        Self::new(default_mapping_table(), true)
    }

    /// Returns `true` when lookups fall back to a case-folded match.
    pub fn is_case_sensitive(&self) -> bool {
        self.folded.is_none()
    }

    /// Number of entries in the mapping table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the mapping table has no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Translates a single category name.
    ///
    /// An empty category resolves to the empty string without a lookup.
    pub fn translate<'a>(&'a self, category: &'a str) -> &'a str {
        if category.is_empty() {
            return "";
        }

        if let Some(mapped) = self.table.get(category) {
            return mapped;
        }

        if let Some(folded) = &self.folded {
            if let Some(mapped) = folded.get(&category.to_lowercase()) {
                return mapped;
            }
        }

        category
    }
}

impl Default for CategoryTranslator {
    fn default() -> Self {
        Self::with_defaults()
    }
}
