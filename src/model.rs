use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A dense row-major matrix with explicit dimensions.
///
/// Weight matrices use one row per destination neuron and one column per
/// source neuron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Builds a matrix from nested rows, rejecting ragged input.
    ///
    /// An empty outer vector yields a 0x0 matrix.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::RaggedMatrix {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Uniform values in `[-1, 1)`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        Self::from_fn(rows, cols, |_, _| rng.gen_range(-1.0..1.0))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds");
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Largest absolute value, or 0 for an empty matrix.
    pub fn max_abs(&self) -> f64 {
        max_abs(&self.data)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        (0..m.rows).map(|r| m.row(r).to_vec()).collect()
    }
}

/// `max(|min|, |max|)` over `values`, 0 when empty.
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
}

#[derive(Serialize, Deserialize)]
struct NetworkFile {
    biases: Vec<Vec<f64>>,
    weights: Vec<Matrix>,
}

/// Biases and weights of a feed-forward network, shape-checked.
///
/// `biases[k]` holds one value per neuron of layer `k`; the input layer has
/// no real biases and is conventionally zero-filled. `weights[k]` connects
/// layer `k` to layer `k + 1` and has shape `[len(biases[k+1]), len(biases[k])]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NetworkFile", into = "NetworkFile")]
pub struct Network {
    biases: Vec<Vec<f64>>,
    weights: Vec<Matrix>,
}

impl Network {
    pub fn new(biases: Vec<Vec<f64>>, weights: Vec<Matrix>) -> Result<Self> {
        let expected = biases.len().saturating_sub(1);
        if weights.len() != expected {
            return Err(Error::LayerCountMismatch {
                layers: biases.len(),
                expected,
                actual: weights.len(),
            });
        }

        for (index, w) in weights.iter().enumerate() {
            let expected_rows = biases[index + 1].len();
            let expected_cols = biases[index].len();
            // A layer without neurons has no rows to carry a column count.
            let cols_ok = w.cols() == expected_cols || (w.rows() == 0 && expected_rows == 0);
            if w.rows() != expected_rows || !cols_ok {
                return Err(Error::ShapeMismatch {
                    index,
                    expected_rows,
                    expected_cols,
                    rows: w.rows(),
                    cols: w.cols(),
                });
            }
            if !w.values().iter().all(|v| v.is_finite()) {
                return Err(Error::NonFinite(format!("weights {index}")));
            }
        }

        for (index, b) in biases.iter().enumerate() {
            if !b.iter().all(|v| v.is_finite()) {
                return Err(Error::NonFinite(format!("biases {index}")));
            }
        }

        Ok(Self { biases, weights })
    }

    /// Builds a network from the biases of every non-input layer, adding a
    /// zero-filled input layer sized to the first weight matrix.
    pub fn with_zero_input(weights: Vec<Matrix>, mut biases: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(first) = weights.first() {
            biases.insert(0, vec![0.0; first.cols()]);
        }
        Self::new(biases, weights)
    }

    /// A network with the given neuron counts and uniform `[-1, 1)` weights
    /// and biases. The input layer's biases are zero.
    pub fn random<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Self {
        let biases: Vec<Vec<f64>> = layer_sizes
            .iter()
            .enumerate()
            .map(|(k, &n)| {
                if k == 0 {
                    vec![0.0; n]
                } else {
                    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect::<Vec<f64>>()
                }
            })
            .collect();
        let weights = layer_sizes
            .windows(2)
            .map(|pair| Matrix::random(pair[1], pair[0], rng))
            .collect();
        Self { biases, weights }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn biases(&self) -> &[Vec<f64>] {
        &self.biases
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn num_layers(&self) -> usize {
        self.biases.len()
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.biases.iter().map(Vec::len).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.biases.is_empty()
    }
}

impl TryFrom<NetworkFile> for Network {
    type Error = Error;

    fn try_from(f: NetworkFile) -> Result<Self> {
        Self::new(f.biases, f.weights)
    }
}

impl From<Network> for NetworkFile {
    fn from(n: Network) -> Self {
        Self {
            biases: n.biases,
            weights: n.weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn matrix_from_rows_keeps_shape_and_order() {
        let w = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(w.shape(), (2, 3));
        assert_eq!(w.get(1, 0), 4.0);
        assert_eq!(w.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(Vec::<Vec<f64>>::from(w.clone())[1], vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn matrix_rejects_ragged_rows() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedMatrix {
                row: 1,
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn max_abs_uses_largest_magnitude() {
        assert_eq!(max_abs(&[-3.0, 1.0, 2.0]), 3.0);
        assert_eq!(max_abs(&[0.5, -0.25]), 0.5);
        assert_eq!(max_abs(&[]), 0.0);
        assert_eq!(m(vec![vec![0.0, 2.0], vec![-2.0, 0.0]]).max_abs(), 2.0);
    }

    #[test]
    fn network_accepts_matching_shapes() {
        let net = Network::new(
            vec![vec![0.0; 2], vec![0.1, 0.2, 0.3]],
            vec![Matrix::zeros(3, 2)],
        )
        .unwrap();
        assert_eq!(net.layer_sizes(), vec![2, 3]);
        assert_eq!(net.num_layers(), 2);
    }

    #[test]
    fn network_rejects_transposed_weights() {
        let err = Network::new(vec![vec![0.0; 2], vec![0.0; 3]], vec![Matrix::zeros(2, 3)])
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { index: 0, .. }));
    }

    #[test]
    fn network_rejects_wrong_layer_count() {
        let err = Network::new(vec![vec![0.0; 2]], vec![Matrix::zeros(1, 2)]).unwrap_err();
        assert!(matches!(
            err,
            Error::LayerCountMismatch {
                layers: 1,
                expected: 0,
                actual: 1
            }
        ));
    }

    #[test]
    fn network_rejects_non_finite_values() {
        let err = Network::new(vec![vec![0.0], vec![f64::NAN]], vec![Matrix::zeros(1, 1)])
            .unwrap_err();
        assert!(matches!(err, Error::NonFinite(ref s) if s == "biases 1"));

        let w = m(vec![vec![f64::INFINITY]]);
        let err = Network::new(vec![vec![0.0], vec![0.0]], vec![w]).unwrap_err();
        assert!(matches!(err, Error::NonFinite(ref s) if s == "weights 0"));
    }

    #[test]
    fn empty_network_is_valid() {
        let net = Network::new(vec![], vec![]).unwrap();
        assert!(net.is_empty());
    }

    #[test]
    fn zero_input_layer_is_prepended() {
        let net = Network::with_zero_input(
            vec![Matrix::zeros(3, 4), Matrix::zeros(1, 3)],
            vec![vec![0.5; 3], vec![-1.0]],
        )
        .unwrap();
        assert_eq!(net.layer_sizes(), vec![4, 3, 1]);
        assert_eq!(net.biases()[0], vec![0.0; 4]);
    }

    #[test]
    fn random_network_has_requested_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let net = Network::random(&[3, 5, 2], &mut rng);
        assert_eq!(net.layer_sizes(), vec![3, 5, 2]);
        assert_eq!(net.weights()[0].shape(), (5, 3));
        assert_eq!(net.weights()[1].shape(), (2, 5));
        assert!(net.biases()[0].iter().all(|&b| b == 0.0));
        assert!(net.weights()[1].values().iter().all(|v| (-1.0..1.0).contains(v)));
        // Shapes produced by `random` always pass validation.
        assert!(Network::new(net.biases().to_vec(), net.weights().to_vec()).is_ok());
    }

    #[test]
    fn json_goes_through_validation() {
        let ok = r#"{"biases": [[0, 0], [1, -1]], "weights": [[[0, 2], [-2, 0]]]}"#;
        let net = Network::from_json_str(ok).unwrap();
        assert_eq!(net.weights()[0].get(1, 0), -2.0);

        let bad = r#"{"biases": [[0, 0], [1]], "weights": [[[0, 2], [-2, 0]]]}"#;
        assert!(Network::from_json_str(bad).is_err());

        let ragged = r#"{"biases": [[0, 0], [1, 1]], "weights": [[[0, 2], [-2]]]}"#;
        assert!(Network::from_json_str(ragged).is_err());
    }

    #[test]
    fn json_file_round_trip() {
        let mut rng = StdRng::seed_from_u64(1);
        let net = Network::random(&[2, 3, 1], &mut rng);
        let path = std::env::temp_dir().join(format!("nn-visualizer-{}.json", std::process::id()));
        net.save_json(&path).unwrap();
        let loaded = Network::load_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, net);
    }
}
