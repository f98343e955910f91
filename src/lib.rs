pub mod codec;
pub mod error;
pub mod model;
pub mod sidecar;
pub mod source;
pub mod writer;

pub use codec::{encode_dosage_group, encode_group, pack_column, pack_column_into, packed_len};
pub use error::{CustomError, Result};
pub use model::Genotype;
pub use source::{ColumnSource, GenotypeMatrix, MatrixColumns, RandomColumns};
pub use writer::{BedWriter, bed_file_size, check_request, write_bed};
