//! Core dataset structures for regression problems.
use crate::common::traits::Data;
use crate::dataset::error::DatasetError;

use super::loaders::csv_loader::load_csv;

/// Loader output: feature names, target name, feature columns, target column.
pub(crate) type OutputData = (Vec<String>, String, Vec<Vec<f64>>, Vec<f64>);

/// Dataset structure holding named feature columns and a target column.
///
/// Data is column-major: `features[i]` is the full sample column of the
/// `i`-th feature, aligned index-by-index with `targets`.
///
/// # Fields
/// * `feature_names: Vec<String>` - names of features in dataset
/// * `target_name: String` - name of target column
/// * `features: Vec<Vec<f64>>` - feature columns
/// * `targets: Vec<f64>` - target column
pub struct Dataset {
    feature_names: Vec<String>,
    target_name: String,
    features: Vec<Vec<f64>>,
    targets: Vec<f64>
}

impl Dataset {
    /// Creates new dataset with provided fields.
    ///
    /// # Arguments
    /// * `feature_names: Vec<String>` - names of features
    /// * `target_name: String` - name of target column
    /// * `features: Vec<Vec<f64>>` - feature columns
    /// * `targets: Vec<f64>` - target column
    ///
    /// # Returns
    /// * `Result<Self, DatasetError>` - new dataset or error when columns are
    /// empty or of unequal length
    pub fn new(
        feature_names: Vec<String>, target_name: String,
        features: Vec<Vec<f64>>, targets: Vec<f64>
    ) -> Result<Self, DatasetError> {
        if targets.is_empty() { return Err(DatasetError::EmptyDataset); }
        if feature_names.len() != features.len() {
            return Err(DatasetError::DimensionMismatch {
                expected: feature_names.len(), found: features.len()
            });
        }
        for column in &features {
            if column.len() != targets.len() {
                return Err(DatasetError::DimensionMismatch {
                    expected: targets.len(), found: column.len()
                });
            }
        }
        return Ok(Self { feature_names, target_name, features, targets });
    }

    /// Loads dataset from CSV file. The last column is the target.
    ///
    /// # Arguments
    /// * `path: &str` - path to csv file
    /// * `n_features: usize` - number of feature columns before the target
    ///
    /// # Returns
    /// * `Result<Self, DatasetError>` - new dataset or error if loading fails
    pub fn from_csv(path: &str, n_features: usize) -> Result<Self, DatasetError> {
        let (feature_names, target_name, features, targets) = load_csv(path, n_features)?;

        return Self::new(feature_names, target_name, features, targets);
    }

    /// Returns number of samples.
    pub fn n_samples(&self) -> usize { return self.targets.len(); }

    /// Returns index of the feature column with given name.
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        return self.feature_names.iter().position(|feature| feature == name);
    }
}

impl Data for Dataset {
    fn names(&self) -> (&Vec<String>, &String) { return (&self.feature_names, &self.target_name); }
    fn data(&self) -> (&Vec<Vec<f64>>, &Vec<f64>) { return (&self.features, &self.targets); }
}
