use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("could not read {path}")]
    ReadNpy {
        #[source]
        source: ndarray_npy::ReadNpyError,
        path: std::path::PathBuf,
    },

    #[error("could not write to {path}")]
    Write {
        #[source]
        source: std::io::Error,
        path: std::path::PathBuf,
    },

    #[error("could not write genotype data")]
    WriteWithoutPath {
        #[source]
        source: std::io::Error,
    },

    #[error("could not write sidecar file")]
    CsvWrite(#[from] csv::Error),

    #[error("could not create output directory")]
    OutputDir {
        #[source]
        source: std::io::Error,
    },

    #[error("invalid genotype value {value} (expected 0, 1, 2 or missing)")]
    InvalidGenotype { value: String },

    #[error(
        "invalid genotype value {value} at individual {row}, marker {col} (expected 0, 1, 2 or missing)"
    )]
    InvalidGenotypeAt {
        value: String,
        row: usize,
        col: usize,
    },

    #[error("{n_individuals} individuals x {n_markers} markers is not representable")]
    InvalidDimension {
        n_individuals: usize,
        n_markers: usize,
    },

    #[error("requested {requested} markers but the source only holds {available}")]
    MarkerCount { requested: usize, available: usize },

    #[error("expected a column of {expected} genotypes (got {found})")]
    ColumnLength { expected: usize, found: usize },

    #[error("write aborted after {columns_written} markers")]
    Aborted { columns_written: usize },
}

pub type Result<T> = std::result::Result<T, CustomError>;
