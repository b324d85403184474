use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Data category tag used to select parsers, schemas, and endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Indices,
    Equities,
    Futures,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Indices, Self::Equities, Self::Futures];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Indices => "indices",
            Self::Equities => "equities",
            Self::Futures => "futures",
        }
    }

    /// Capitalized label used in output file names.
    pub const fn file_label(self) -> &'static str {
        match self {
            Self::Indices => "Indices",
            Self::Equities => "Equities",
            Self::Futures => "Futures",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
