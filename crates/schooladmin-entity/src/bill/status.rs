//! Bill payment status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment state of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillStatus {
    /// Issued, not yet paid.
    Pending,
    /// Parent uploaded a payment proof awaiting admin verification.
    Verifying,
    /// Payment verified.
    Paid,
    /// Past its due date without payment.
    Overdue,
}

impl BillStatus {
    /// Whether the bill still counts as outstanding work for the admin.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, Self::Pending | Self::Verifying)
    }

    /// Whether the admin can verify payment on this bill.
    pub fn can_verify(&self) -> bool {
        !matches!(self, Self::Paid)
    }

    /// Return the status as the backend spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Verifying => "Verifying",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BillStatus {
    type Err = schooladmin_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "verifying" => Ok(Self::Verifying),
            "paid" => Ok(Self::Paid),
            "overdue" => Ok(Self::Overdue),
            _ => Err(schooladmin_core::AppError::validation(format!(
                "Invalid bill status: '{s}'. Expected one of: Pending, Verifying, Paid, Overdue"
            ))),
        }
    }
}
