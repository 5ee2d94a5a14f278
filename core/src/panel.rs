use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// One cell of the board, showing either its face or its flipped face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Panel {
    #[serde(rename = "O")]
    O,
    #[serde(rename = "X")]
    X,
}

impl Panel {
    pub const fn flipped(self) -> Self {
        match self {
            Self::O => Self::X,
            Self::X => Self::O,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::O => 'O',
            Self::X => 'X',
        }
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::O
    }
}

impl TryFrom<char> for Panel {
    type Error = GameError;

    fn try_from(value: char) -> Result<Self> {
        match value {
            'O' => Ok(Self::O),
            'X' => Ok(Self::X),
            _ => Err(GameError::InvalidPanel),
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
