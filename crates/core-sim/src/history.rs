use serde::{Deserialize, Serialize};

pub const HISTORY_COLUMNS: [&str; 5] = ["step", "price", "cash", "position", "value"];

/// Portfolio state right after one executed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    pub price: f64,
    pub cash: f64,
    pub position: f64,
    pub value: f64,
}

impl StepRecord {
    pub(crate) fn new(step: usize, price: f64, cash: f64, position: f64) -> Self {
        Self {
            step,
            price,
            cash,
            position,
            value: cash + position * price,
        }
    }
}

/// Owned copy of a run's records, one row per executed step in step order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    rows: Vec<StepRecord>,
}

impl History {
    pub fn rows(&self) -> &[StepRecord] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&StepRecord> {
        self.rows.get(index)
    }

    pub fn last(&self) -> Option<&StepRecord> {
        self.rows.last()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn steps(&self) -> Vec<usize> {
        self.rows.iter().map(|row| row.step).collect()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.column(|row| row.price)
    }

    pub fn cash(&self) -> Vec<f64> {
        self.column(|row| row.cash)
    }

    pub fn positions(&self) -> Vec<f64> {
        self.column(|row| row.position)
    }

    pub fn values(&self) -> Vec<f64> {
        self.column(|row| row.value)
    }

    fn column(&self, field: impl Fn(&StepRecord) -> f64) -> Vec<f64> {
        self.rows.iter().map(field).collect()
    }
}

impl From<Vec<StepRecord>> for History {
    fn from(rows: Vec<StepRecord>) -> Self {
        Self { rows }
    }
}

impl IntoIterator for History {
    type Item = StepRecord;
    type IntoIter = std::vec::IntoIter<StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{History, StepRecord, HISTORY_COLUMNS};

    fn two_rows() -> History {
        History::from(vec![
            StepRecord::new(0, 10.0, 90.0, 1.0),
            StepRecord::new(1, 11.0, 79.0, 2.0),
        ])
    }

    #[test]
    fn record_value_is_cash_plus_marked_position() {
        let record = StepRecord::new(3, 12.5, -20.0, 4.0);

        assert_eq!(record.value, 30.0);
    }

    #[test]
    fn columns_follow_row_order() {
        let history = two_rows();

        assert_eq!(history.steps(), vec![0, 1]);
        assert_eq!(history.prices(), vec![10.0, 11.0]);
        assert_eq!(history.cash(), vec![90.0, 79.0]);
        assert_eq!(history.positions(), vec![1.0, 2.0]);
        assert_eq!(history.values(), vec![100.0, 101.0]);
        assert_eq!(history.last().map(|row| row.step), Some(1));
    }

    #[test]
    fn serializes_as_rows_with_exact_column_names() {
        let json = serde_json::to_value(two_rows()).unwrap();

        assert_eq!(
            json,
            json!([
                {"step": 0, "price": 10.0, "cash": 90.0, "position": 1.0, "value": 100.0},
                {"step": 1, "price": 11.0, "cash": 79.0, "position": 2.0, "value": 101.0},
            ])
        );

        let row = json[0].as_object().unwrap();
        for column in HISTORY_COLUMNS {
            assert!(row.contains_key(column), "missing column {column}");
        }
    }

    #[test]
    fn deserializes_back_into_history() {
        let json = serde_json::to_string(&two_rows()).unwrap();

        let history: History = serde_json::from_str(&json).unwrap();

        assert_eq!(history, two_rows());
    }
}
