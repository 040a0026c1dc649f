use std::fmt::Display;

use crate::datasets::{chat, transactions};

/// The Dataset enum
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Dataset {
    /// Labeled transaction descriptions (needs/wants)
    Transactions,

    /// Labeled chat messages (intent classes)
    Chat,
}

impl TryFrom<&str> for Dataset {
    type Error = DatasetError;

    /// Try to convert a string to a Dataset
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.to_lowercase();

        if value == transactions::DATASET {
            Ok(Dataset::Transactions)
        } else if value == chat::DATASET {
            Ok(Dataset::Chat)
        } else {
            Err(Self::Error::Unknown(value))
        }
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dataset::Transactions => transactions::DATASET,
            Dataset::Chat => chat::DATASET,
        };

        write!(f, "{}", name)
    }
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// No dataset found for the given string
    #[error("no dataset found for {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn names_round_trip() {
        for dataset in [Dataset::Transactions, Dataset::Chat] {
            let name = dataset.to_string();

            assert_eq!(Dataset::try_from(name.as_str()).unwrap(), dataset);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(Dataset::try_from("snips").is_err());
    }
}
