use {
    super::error::StoreError,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Order amount in whole rupiah. Tripay settles IDR only and IDR has no
/// subunit, so the integer is the full price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub fn new(value: i64) -> Result<Self, StoreError> {
        if value < 0 {
            return Err(StoreError::Validation(format!(
                "Amount cannot be negative, got: {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Const constructor for catalog literals. Negative input fails the
    /// build instead of the process.
    pub const fn from_idr(value: i64) -> Self {
        assert!(value >= 0);
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
