//! Explanations for the columns of the move table.

use std::fmt;
use std::str::FromStr;

use crate::error::DexError;

/// Shown wherever a value is absent
pub const PLACEHOLDER: &str = "—";

/// A data column of the move table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveColumn {
    Level,
    Power,
    Accuracy,
    Pp,
    Type,
    DamageClass,
}

impl MoveColumn {
    pub const ALL: [MoveColumn; 6] = [
        MoveColumn::Level,
        MoveColumn::Power,
        MoveColumn::Accuracy,
        MoveColumn::Pp,
        MoveColumn::Type,
        MoveColumn::DamageClass,
    ];

    pub fn title(self) -> &'static str {
        match self {
            MoveColumn::Level => "Level",
            MoveColumn::Power => "Power",
            MoveColumn::Accuracy => "Accuracy",
            MoveColumn::Pp => "PP",
            MoveColumn::Type => "Type",
            MoveColumn::DamageClass => "Damage Class",
        }
    }

    /// What the column means, independent of any row
    pub fn header_tip(self) -> &'static str {
        match self {
            MoveColumn::Level => "Level: the level at which the move is learned by level-up.",
            MoveColumn::Power => "Power: base strength of the move (— for status moves or none).",
            MoveColumn::Accuracy => {
                "Accuracy: chance to hit the target in percent (— when not applicable)."
            }
            MoveColumn::Pp => "PP: number of uses before the move must be restored.",
            MoveColumn::Type => "Type: elemental type of the move (fire, water, ...).",
            MoveColumn::DamageClass => {
                "Damage Class: physical/special/status, how the move deals its effect."
            }
        }
    }

    /// Explanation for one cell, given its displayed text
    pub fn describe_cell(self, text: &str) -> String {
        let text = text.trim();
        let absent = text.is_empty() || text == PLACEHOLDER;
        match self {
            MoveColumn::Level if absent => "Not learned by level-up in this version.".to_string(),
            MoveColumn::Level => format!("Learned at level {text}."),
            MoveColumn::Power if absent => "No base power (status move).".to_string(),
            MoveColumn::Power => format!("Base power: {text}."),
            MoveColumn::Accuracy if absent => "Accuracy does not apply / always hits.".to_string(),
            MoveColumn::Accuracy => format!("Accuracy: {text}%."),
            MoveColumn::Pp if absent => "PP not available.".to_string(),
            MoveColumn::Pp => format!("Can be used {text} times before it must be restored."),
            MoveColumn::Type if absent => "Move type unknown.".to_string(),
            MoveColumn::Type => format!("Move type: {text}."),
            MoveColumn::DamageClass => describe_damage_class(text).to_string(),
        }
    }
}

impl fmt::Display for MoveColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for MoveColumn {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "level" | "lvl" => Ok(MoveColumn::Level),
            "power" => Ok(MoveColumn::Power),
            "accuracy" | "acc" => Ok(MoveColumn::Accuracy),
            "pp" => Ok(MoveColumn::Pp),
            "type" => Ok(MoveColumn::Type),
            "damageclass" | "class" => Ok(MoveColumn::DamageClass),
            _ => Err(DexError::InvalidCommand(format!("unknown column '{}'", s.trim()))),
        }
    }
}

pub fn describe_damage_class(value: &str) -> &'static str {
    match value.trim().to_lowercase().as_str() {
        "physical" => "Physical: uses Attack against Defense.",
        "special" => "Special: uses Sp. Atk against Sp. Def.",
        "status" => "Status: deals no direct damage; applies an effect.",
        _ => "Damage class of the move.",
    }
}
