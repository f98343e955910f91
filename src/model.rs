use crate::error::{CustomError, Result};

/// Dosage conventionally used for a missing call in PLINK text formats.
pub const MISSING_DOSAGE: i8 = -9;

/// A single genotype call, counted in copies of the alternate allele.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Genotype {
    #[default]
    HomRef = 0,
    Het = 1,
    HomAlt = 2,
    Missing,
}

impl Genotype {
    pub fn from_alt_count(count: u8) -> Option<Self> {
        match count {
            0 => Some(Genotype::HomRef),
            1 => Some(Genotype::Het),
            2 => Some(Genotype::HomAlt),
            _ => None,
        }
    }

    pub fn alt_count(self) -> Option<u8> {
        match self {
            Genotype::Missing => None,
            other => Some(other as u8),
        }
    }

    pub fn is_missing(self) -> bool {
        self == Genotype::Missing
    }
}

impl TryFrom<f64> for Genotype {
    type Error = CustomError;

    fn try_from(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Ok(Genotype::Missing);
        }
        if value == 0.0 {
            Ok(Genotype::HomRef)
        } else if value == 1.0 {
            Ok(Genotype::Het)
        } else if value == 2.0 {
            Ok(Genotype::HomAlt)
        } else {
            Err(CustomError::InvalidGenotype {
                value: value.to_string(),
            })
        }
    }
}

impl TryFrom<i8> for Genotype {
    type Error = CustomError;

    fn try_from(value: i8) -> Result<Self> {
        if value == MISSING_DOSAGE {
            return Ok(Genotype::Missing);
        }
        u8::try_from(value)
            .ok()
            .and_then(Genotype::from_alt_count)
            .ok_or_else(|| CustomError::InvalidGenotype {
                value: value.to_string(),
            })
    }
}
