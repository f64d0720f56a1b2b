//! Source and destination transaction records.
//!
//! Source rows are kept as untyped, ordered name/value pairs since the two
//! export shapes differ only in which optional columns exist. Destination rows
//! have a fixed 8-column shape.

use crate::category::CategoryTranslator;

/// Destination header, in the exact order Monarch expects.
pub const MONARCH_HEADERS: [&str; 8] = [
    "Date",
    "Merchant",
    "Category",
    "Account",
    "Original Statement",
    "Notes",
    "Amount",
    "Tags",
];

/// One row of a Personal Capital export.
///
/// A field that is absent and a field that is present but empty read the same
/// through [`SourceRecord::field`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRecord {
    fields: Vec<(String, String)>,
}

impl SourceRecord {
    /// Builds a record from `(column, value)` pairs in source order.
    pub fn new(fields: Vec<(String, String)>) -> Self {
        SourceRecord { fields }
    }

    /// Pairs header names with row values.
    ///
    /// Short rows leave trailing columns absent; surplus values are dropped.
    pub fn from_row<'a, H, V>(headers: H, values: V) -> Self
    where
        H: IntoIterator<Item = &'a str>,
        V: IntoIterator<Item = &'a str>,
    {
        let fields = headers
            .into_iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        SourceRecord { fields }
    }

    /// Returns the value of `name`, or `""` if the column is absent.
    pub fn field(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Returns the value of `name` if the column is present.
    ///
    /// With a repeated header, the last column of that name wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn date(&self) -> &str {
        self.field("Date")
    }

    pub fn description(&self) -> &str {
        self.field("Description")
    }

    pub fn category(&self) -> &str {
        self.field("Category")
    }

    pub fn tags(&self) -> &str {
        self.field("Tags")
    }

    pub fn amount(&self) -> &str {
        self.field("Amount")
    }

    /// Investment exports only.
    pub fn action(&self) -> &str {
        self.field("Action")
    }
}

/// One row of a Monarch import file.
///
/// Field order matches [`MONARCH_HEADERS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonarchRecord {
    pub date: String,
    pub merchant: String,
    pub category: String,

    /// Always empty; the account is picked during import.
    pub account: String,

    /// Same text as `merchant`.
    pub original_statement: String,

    /// Investment action (Buy, Sell, ...), empty for standard exports.
    pub notes: String,

    /// Verbatim source text; sign and decimals are never touched.
    pub amount: String,

    pub tags: String,
}

impl MonarchRecord {
    /// Values in header order.
    pub fn as_row(&self) -> [&str; 8] {
        [
            self.date.as_str(),
            self.merchant.as_str(),
            self.category.as_str(),
            self.account.as_str(),
            self.original_statement.as_str(),
            self.notes.as_str(),
            self.amount.as_str(),
            self.tags.as_str(),
        ]
    }
}

/// Maps one source row onto the Monarch schema.
pub fn transform(record: &SourceRecord, translator: &CategoryTranslator) -> MonarchRecord {
    let description = record.description();

    MonarchRecord {
        date: record.date().to_string(),
        merchant: description.to_string(),
        category: translator.translate(record.category()).to_string(),
        account: String::new(),
        original_statement: description.to_string(),
        notes: record.action().to_string(),
        amount: record.amount().to_string(),
        tags: record.tags().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> SourceRecord {
        SourceRecord::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn gas_translator() -> CategoryTranslator {
        CategoryTranslator::new(
            [("Gasoline/Fuel".to_string(), "Gas".to_string())]
                .into_iter()
                .collect(),
            true,
        )
    }

    #[test]
    fn test_transform_basic_transaction() {
        let source = record(&[
            ("Date", "2024-01-15"),
            ("Description", "Shell Gas Station"),
            ("Category", "Gasoline/Fuel"),
            ("Tags", "business"),
            ("Amount", "-45.00"),
        ]);

        let result = transform(&source, &gas_translator());

        assert_eq!(
            result,
            MonarchRecord {
                date: "2024-01-15".into(),
                merchant: "Shell Gas Station".into(),
                category: "Gas".into(),
                account: "".into(),
                original_statement: "Shell Gas Station".into(),
                notes: "".into(),
                amount: "-45.00".into(),
                tags: "business".into(),
            }
        );
    }

    #[test]
    fn test_transform_investment_action_to_notes() {
        let source = record(&[
            ("Date", "2024-01-15"),
            ("Description", "AAPL Stock"),
            ("Category", "Stocks"),
            ("Action", "Buy"),
            ("Quantity", "10"),
            ("Price", "100.00"),
            ("Amount", "-1000.00"),
        ]);

        let result = transform(&source, &gas_translator());
        assert_eq!(result.notes, "Buy");
        assert_eq!(result.category, "Stocks");
    }

    #[test]
    fn test_transform_missing_fields() {
        let source = record(&[
            ("Date", "2024-01-15"),
            ("Description", "Test Transaction"),
            ("Amount", "-10.00"),
        ]);

        let result = transform(&source, &gas_translator());
        assert_eq!(result.category, "");
        assert_eq!(result.tags, "");
        assert_eq!(result.notes, "");
        assert_eq!(result.amount, "-10.00");
    }

    #[test]
    fn test_transform_empty_record() {
        let result = transform(&SourceRecord::default(), &gas_translator());
        assert!(result.as_row().iter().all(|v| v.is_empty()));
    }

    #[test]
    fn test_amount_preserved_verbatim() {
        for amount in ["0.00", "-0.50", "2500.00", "1,234.5", "  -3 "] {
            let source = record(&[("Amount", amount)]);
            assert_eq!(transform(&source, &gas_translator()).amount, amount);
        }
    }

    #[test]
    fn test_merchant_equals_original_statement() {
        let source = record(&[("Description", "McDonald's, Inc. & \"Big Store\"")]);
        let result = transform(&source, &gas_translator());
        assert_eq!(result.merchant, result.original_statement);
        assert_eq!(result.merchant, "McDonald's, Inc. & \"Big Store\"");
    }

    #[test]
    fn test_transform_is_deterministic() {
        let source = record(&[("Description", "Café München"), ("Category", "Gasoline/Fuel")]);
        let translator = gas_translator();
        assert_eq!(transform(&source, &translator), transform(&source, &translator));
    }

    #[test]
    fn test_from_row_short_and_long_rows() {
        let headers = ["Date", "Description", "Amount"];

        let short = SourceRecord::from_row(headers, ["2024-01-15"]);
        assert_eq!(short.date(), "2024-01-15");
        assert_eq!(short.get("Amount"), None);

        let long = SourceRecord::from_row(headers, ["2024-01-15", "Store", "-1.00", "extra"]);
        assert_eq!(long.amount(), "-1.00");
    }

    #[test]
    fn test_repeated_header_reads_last_column() {
        let source = SourceRecord::from_row(
            ["Date", "Amount", "Description", "Amount"],
            ["2024-01-15", "-1.00", "Store", "-2.00"],
        );
        assert_eq!(source.amount(), "-2.00");
        assert_eq!(transform(&source, &gas_translator()).amount, "-2.00");
    }

    #[test]
    fn test_as_row_matches_header_order() {
        let source = record(&[
            ("Date", "d"),
            ("Description", "m"),
            ("Category", "c"),
            ("Action", "n"),
            ("Amount", "a"),
            ("Tags", "t"),
        ]);
        let row = transform(&source, &gas_translator());
        assert_eq!(row.as_row(), ["d", "m", "c", "", "m", "n", "a", "t"]);
    }
}
