use ndarray::{Array2, Axis};
use rand::Rng;
use std::path::Path;

use crate::error::{CustomError, Result};
use crate::model::Genotype;

const MAX_ALLELE_FREQUENCY: f64 = 0.5;

/// Supplies genotype calls one marker (column) at a time.
pub trait ColumnSource {
    fn n_individuals(&self) -> usize;
    /// Number of markers left to hand out, or `None` for an unbounded source.
    fn n_markers(&self) -> Option<usize>;
    /// Replaces the contents of `column` with the next marker's calls.
    fn next_column(&mut self, column: &mut Vec<Genotype>) -> Result<()>;
}

/// Draws one synthetic marker: an allele frequency from U[0, 0.5], then one
/// Binomial(2, f) count per individual.
fn draw_column<R: Rng>(rng: &mut R, n_individuals: usize, column: &mut Vec<Genotype>) {
    let freq = rng.random_range(0.0..=MAX_ALLELE_FREQUENCY);
    column.clear();
    column.extend((0..n_individuals).map(|_| {
        let count = rng.random_bool(freq) as u8 + rng.random_bool(freq) as u8;
        Genotype::from_alt_count(count).unwrap_or(Genotype::HomAlt)
    }));
}

fn check_dimensions(n_individuals: usize, n_markers: usize) -> Result<()> {
    match n_individuals
        .checked_mul(n_markers)
        .filter(|&len| len <= isize::MAX as usize)
    {
        Some(_) => Ok(()),
        None => Err(CustomError::InvalidDimension {
            n_individuals,
            n_markers,
        }),
    }
}

/// A fully materialized individuals x markers matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct GenotypeMatrix {
    data: Array2<Genotype>,
}

impl GenotypeMatrix {
    pub fn new(data: Array2<Genotype>) -> Self {
        Self { data }
    }

    pub fn random<R: Rng>(n_individuals: usize, n_markers: usize, rng: &mut R) -> Result<Self> {
        check_dimensions(n_individuals, n_markers)?;
        let mut data = Array2::from_elem((n_individuals, n_markers), Genotype::HomRef);
        let mut column = Vec::with_capacity(n_individuals);
        for mut lane in data.axis_iter_mut(Axis(1)) {
            draw_column(rng, n_individuals, &mut column);
            for (cell, &genotype) in lane.iter_mut().zip(&column) {
                *cell = genotype;
            }
        }
        Ok(Self { data })
    }

    /// Validates numeric dosages (0, 1, 2, NaN = missing).
    pub fn from_dosages(dosages: &Array2<f64>) -> Result<Self> {
        let mut data = Array2::from_elem(dosages.dim(), Genotype::HomRef);
        for ((row, col), &value) in dosages.indexed_iter() {
            data[[row, col]] =
                Genotype::try_from(value).map_err(|_| CustomError::InvalidGenotypeAt {
                    value: value.to_string(),
                    row,
                    col,
                })?;
        }
        Ok(Self { data })
    }

    /// Loads an individuals x markers `f64` array stored as `.npy`.
    pub fn from_npy(path: &impl AsRef<Path>) -> Result<Self> {
        let dosages: Array2<f64> =
            ndarray_npy::read_npy(path).map_err(|e| CustomError::ReadNpy {
                source: e,
                path: path.as_ref().to_path_buf(),
            })?;
        Self::from_dosages(&dosages)
    }

    pub fn n_individuals(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_markers(&self) -> usize {
        self.data.ncols()
    }

    pub fn get(&self, individual: usize, marker: usize) -> Option<Genotype> {
        self.data.get([individual, marker]).copied()
    }

    /// Alternate allele frequency per marker over non-missing calls.
    /// Markers with no calls get NaN.
    pub fn allele_frequencies(&self) -> Vec<f64> {
        self.data
            .axis_iter(Axis(1))
            .map(|column| {
                let (alt, called) = column
                    .iter()
                    .filter_map(|g| g.alt_count())
                    .fold((0u64, 0u64), |(alt, called), count| {
                        (alt + count as u64, called + 1)
                    });
                if called == 0 {
                    f64::NAN
                } else {
                    alt as f64 / (2 * called) as f64
                }
            })
            .collect()
    }

    pub fn columns(&self) -> MatrixColumns<'_> {
        MatrixColumns {
            matrix: self,
            next_marker: 0,
        }
    }
}

/// Cursor handing out the columns of a [`GenotypeMatrix`] in order.
pub struct MatrixColumns<'a> {
    matrix: &'a GenotypeMatrix,
    next_marker: usize,
}

impl ColumnSource for MatrixColumns<'_> {
    fn n_individuals(&self) -> usize {
        self.matrix.n_individuals()
    }

    fn n_markers(&self) -> Option<usize> {
        Some(self.matrix.n_markers() - self.next_marker)
    }

    fn next_column(&mut self, column: &mut Vec<Genotype>) -> Result<()> {
        if self.next_marker >= self.matrix.n_markers() {
            return Err(CustomError::MarkerCount {
                requested: self.next_marker + 1,
                available: self.matrix.n_markers(),
            });
        }
        column.clear();
        column.extend(self.matrix.data.column(self.next_marker).iter().copied());
        self.next_marker += 1;
        Ok(())
    }
}

/// Generates synthetic markers lazily, never holding more than one column.
pub struct RandomColumns<R> {
    n_individuals: usize,
    rng: R,
}

impl<R: Rng> RandomColumns<R> {
    pub fn new(n_individuals: usize, rng: R) -> Self {
        Self { n_individuals, rng }
    }
}

impl<R: Rng> ColumnSource for RandomColumns<R> {
    fn n_individuals(&self) -> usize {
        self.n_individuals
    }

    fn n_markers(&self) -> Option<usize> {
        None
    }

    fn next_column(&mut self, column: &mut Vec<Genotype>) -> Result<()> {
        draw_column(&mut self.rng, self.n_individuals, column);
        Ok(())
    }
}
