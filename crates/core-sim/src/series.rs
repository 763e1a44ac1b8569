use crate::error::ConfigError;

pub const DEFAULT_CLOSE_COLUMN: &str = "Close";

/// Named `f64` columns of equal length, in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PriceTable {
    columns: Vec<(String, Vec<f64>)>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns<I, S>(columns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        columns
            .into_iter()
            .try_fold(Self::new(), |table, (name, values)| {
                table.with_column(name, values)
            })
    }

    /// Adds or replaces a column. Every column must have the same row count.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let expected = self
            .columns
            .iter()
            .find(|(existing, _)| *existing != name)
            .map(|(_, existing)| existing.len());

        if let Some(expected) = expected {
            if expected != values.len() {
                return Err(ConfigError::ColumnLengthMismatch {
                    column: name,
                    expected,
                    actual: values.len(),
                });
            }
        }

        match self.columns.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = values,
            None => self.columns.push((name, values)),
        }

        Ok(self)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Close prices indexed `0..len`. Never empty, every price finite.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    closes: Vec<f64>,
}

impl PriceSeries {
    pub fn from_table(table: &PriceTable, close_column: &str) -> Result<Self, ConfigError> {
        let closes = table
            .column(close_column)
            .ok_or_else(|| ConfigError::MissingCloseColumn {
                column: close_column.to_string(),
            })?;

        Self::from_closes(closes.to_vec())
    }

    pub fn from_closes(closes: Vec<f64>) -> Result<Self, ConfigError> {
        if closes.is_empty() {
            return Err(ConfigError::EmptySeries);
        }
        if let Some(index) = closes.iter().position(|price| !price.is_finite()) {
            return Err(ConfigError::NonFinitePrice { index });
        }

        Ok(Self { closes })
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.closes.get(index).copied()
    }

    pub fn first(&self) -> f64 {
        self.closes[0]
    }

    pub fn last(&self) -> f64 {
        self.closes[self.closes.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.closes
    }

    pub fn sum(&self) -> f64 {
        self.closes.iter().sum()
    }
}
