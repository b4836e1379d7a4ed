use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Condition of bottles loaded for a factory exchange.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottleCondition {
    Empty,
    Defective,
}

impl BottleCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            BottleCondition::Empty => "empty",
            BottleCondition::Defective => "defective",
        }
    }
}

impl fmt::Display for BottleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BottleCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(BottleCondition::Empty),
            "defective" => Ok(BottleCondition::Defective),
            other => Err(format!("unknown bottle condition: {other}")),
        }
    }
}

/// Which supplier debt counter a settlement applies to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    Empty,
    Defective,
}

impl DebtKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DebtKind::Empty => "empty",
            DebtKind::Defective => "defective",
        }
    }
}

impl fmt::Display for DebtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DebtKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(DebtKind::Empty),
            "defective" => Ok(DebtKind::Defective),
            other => Err(format!("unknown debt kind: {other}")),
        }
    }
}
