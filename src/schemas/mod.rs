use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod achievement;
pub mod post;
pub mod stats;

/// Challenge categories. Stored as their exact names, so aggregation
/// groups and client filters share one vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Web,
    Crypto,
    Forensics,
    Pwn,
    Reverse,
    Misc,
}

pub const ALLOWED_CATEGORIES: &str = "Web, Crypto, Forensics, Pwn, Reverse, Misc";

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Web => "Web",
            Category::Crypto => "Crypto",
            Category::Forensics => "Forensics",
            Category::Pwn => "Pwn",
            Category::Reverse => "Reverse",
            Category::Misc => "Misc",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "Web" => Ok(Category::Web),
            "Crypto" => Ok(Category::Crypto),
            "Forensics" => Ok(Category::Forensics),
            "Pwn" => Ok(Category::Pwn),
            "Reverse" => Ok(Category::Reverse),
            "Misc" => Ok(Category::Misc),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

pub const ALLOWED_DIFFICULTIES: &str = "Easy, Medium, Hard";

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Payload validation helpers shared by the create schemas. Each one
// records the offending field in `missing` and yields None, so a single
// response can list every problem at once.

pub(crate) fn require_text(
    value: Option<String>,
    name: &str,
    missing: &mut Vec<String>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            missing.push(name.to_string());
            None
        }
    }
}

pub(crate) fn require_enum<T: FromStr>(
    value: Option<&str>,
    name: &str,
    allowed: &str,
    missing: &mut Vec<String>,
) -> Option<T> {
    match value {
        None | Some("") => {
            missing.push(name.to_string());
            None
        }
        Some(raw) => match raw.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                missing.push(format!("{name} must be one of {allowed}"));
                None
            }
        },
    }
}
