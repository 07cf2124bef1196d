/// One decoy row of a score file, fields kept as written.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub fields: Vec<String>,
}

/// A parsed score file: header columns plus one row per generated structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    pub columns: Vec<String>,
    pub rows: Vec<ScoreRow>,
}

impl ScoreTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn field<'a>(&self, row: &'a ScoreRow, column: &str) -> Option<&'a str> {
        self.column_index(column)
            .and_then(|i| row.fields.get(i))
            .map(String::as_str)
    }

    /// Numeric value of `column` in `row`, `None` when missing or not a number.
    pub fn value(&self, row: &ScoreRow, column: &str) -> Option<f64> {
        self.field(row, column).and_then(|v| v.parse::<f64>().ok())
    }

    /// The decoy name, taken from `description` or else the last field.
    pub fn description<'a>(&self, row: &'a ScoreRow) -> &'a str {
        self.field(row, "description")
            .or_else(|| row.fields.last().map(String::as_str))
            .unwrap_or("")
    }
}
