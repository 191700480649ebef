// SPDX-License-Identifier: MIT

use std::{fmt, str::FromStr};

use super::constants::*;
use crate::DecodeError;

/// RFC 2863 operational state of an interface (`IFLA_OPERSTATE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperState {
    Unknown,
    NotPresent,
    Down,
    LowerLayerDown,
    Testing,
    Dormant,
    Up,
}

impl OperState {
    pub const ALL: [OperState; 7] = [
        Self::Unknown,
        Self::NotPresent,
        Self::Down,
        Self::LowerLayerDown,
        Self::Testing,
        Self::Dormant,
        Self::Up,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::NotPresent => "NOTPRESENT",
            Self::Down => "DOWN",
            Self::LowerLayerDown => "LOWERLAYERDOWN",
            Self::Testing => "TESTING",
            Self::Dormant => "DORMANT",
            Self::Up => "UP",
        }
    }
}

impl TryFrom<u8> for OperState {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            IF_OPER_UNKNOWN => Self::Unknown,
            IF_OPER_NOTPRESENT => Self::NotPresent,
            IF_OPER_DOWN => Self::Down,
            IF_OPER_LOWERLAYERDOWN => Self::LowerLayerDown,
            IF_OPER_TESTING => Self::Testing,
            IF_OPER_DORMANT => Self::Dormant,
            IF_OPER_UP => Self::Up,
            other => {
                return Err(DecodeError::unknown_enum_value(
                    "IF_OPER",
                    other.into(),
                ))
            }
        })
    }
}

impl From<OperState> for u8 {
    fn from(state: OperState) -> u8 {
        match state {
            OperState::Unknown => IF_OPER_UNKNOWN,
            OperState::NotPresent => IF_OPER_NOTPRESENT,
            OperState::Down => IF_OPER_DOWN,
            OperState::LowerLayerDown => IF_OPER_LOWERLAYERDOWN,
            OperState::Testing => IF_OPER_TESTING,
            OperState::Dormant => IF_OPER_DORMANT,
            OperState::Up => IF_OPER_UP,
        }
    }
}

impl FromStr for OperState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown operational state {s:?}"))
    }
}

impl fmt::Display for OperState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
