use indexmap::IndexMap;

/// Ordered, named columns of return values.
///
/// This is the "table" branch of the statistics functions: column-wise
/// variants apply a test to every column and return per-column reports in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnsTable {
    columns: IndexMap<String, Vec<f64>>,
}

impl ReturnsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.columns.insert(name.into(), values);
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, Vec<f64>)> for ReturnsTable {
    fn from_iter<I: IntoIterator<Item = (String, Vec<f64>)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
