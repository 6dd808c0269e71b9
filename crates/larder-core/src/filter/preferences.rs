//! User preference value types.
//!
//! Every field is explicitly "unset"-able: an empty diet set, the
//! [`CuisinePreference::Any`] variant, and `None` time/goal all mean "no
//! constraint".

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::DietCategory;

/// Preferences captured at onboarding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Accepted dietary categories. Empty accepts every category.
    #[serde(default, deserialize_with = "one_or_many_diets")]
    pub diet: BTreeSet<DietCategory>,
    #[serde(default)]
    pub cuisine: CuisinePreference,
    /// Upper bound on prep + cook time, in minutes.
    #[serde(
        default,
        alias = "cookTime",
        alias = "cookTimeMax",
        deserialize_with = "minutes_or_numeric_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cook_time_max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
}

impl UserPreferences {
    /// `true` when no field constrains the catalog.
    pub fn is_unconstrained(&self) -> bool {
        self.diet.is_empty() && self.cuisine == CuisinePreference::Any && self.cook_time_max.is_none()
    }
}

// ---------------------------------------------------------------------------
// Cuisine
// ---------------------------------------------------------------------------

/// Sentinel accepted in cuisine lists meaning "any cuisine".
pub const ANY_CUISINE: &str = "Any";

/// Which cuisines the user accepts.
///
/// Serialized as a plain list of names. An empty list, or a list containing
/// `"Any"`, deserializes to [`CuisinePreference::Any`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum CuisinePreference {
    #[default]
    Any,
    Only(BTreeSet<String>),
}

impl CuisinePreference {
    /// Whether a recipe of `cuisine` passes this preference. Names compare
    /// case-insensitively.
    pub fn allows(&self, cuisine: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Only(accepted) => accepted
                .iter()
                .any(|name| name.eq_ignore_ascii_case(cuisine.trim())),
        }
    }
}

impl From<Vec<String>> for CuisinePreference {
    fn from(names: Vec<String>) -> Self {
        let accepted: BTreeSet<String> = names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if accepted.is_empty() || accepted.iter().any(|n| n.eq_ignore_ascii_case(ANY_CUISINE)) {
            Self::Any
        } else {
            Self::Only(accepted)
        }
    }
}

impl From<CuisinePreference> for Vec<String> {
    fn from(pref: CuisinePreference) -> Self {
        match pref {
            CuisinePreference::Any => vec![ANY_CUISINE.to_string()],
            CuisinePreference::Only(names) => names.into_iter().collect(),
        }
    }
}

impl fmt::Display for CuisinePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Only(names) => {
                let joined: Vec<&str> = names.iter().map(String::as_str).collect();
                f.write_str(&joined.join(", "))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Goal
// ---------------------------------------------------------------------------

/// Health goal chosen at onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Loss,
    Maintain,
    Protein,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Loss => "loss",
            Self::Maintain => "maintain",
            Self::Protein => "protein",
        };
        f.write_str(s)
    }
}

impl FromStr for Goal {
    type Err = GoalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loss" | "weight-loss" => Ok(Self::Loss),
            "maintain" => Ok(Self::Maintain),
            "protein" | "high-protein" => Ok(Self::Protein),
            _ => Err(GoalParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Goal`] string.
#[derive(Debug, Clone)]
pub struct GoalParseError(pub String);

impl fmt::Display for GoalParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid goal: {:?} (expected loss, maintain, or protein)", self.0)
    }
}

impl std::error::Error for GoalParseError {}

// ---------------------------------------------------------------------------
// Lenient field deserializers
// ---------------------------------------------------------------------------

/// Diet may be stored as a single value (`"vegan"`) or a list.
fn one_or_many_diets<'de, D>(deserializer: D) -> Result<BTreeSet<DietCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(DietCategory),
        Many(Vec<DietCategory>),
        Unset(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(diet) => BTreeSet::from([diet]),
        OneOrMany::Many(diets) => diets.into_iter().collect(),
        OneOrMany::Unset(()) => BTreeSet::new(),
    })
}

/// Cook time may be stored as a number or a numeric string (`"30"`).
fn minutes_or_numeric_string<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Minutes {
        Number(u32),
        Text(String),
        Unset(()),
    }

    match Minutes::deserialize(deserializer)? {
        Minutes::Number(n) => Ok(Some(n)),
        Minutes::Text(s) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid cook time {s:?}"))),
        Minutes::Unset(()) => Ok(None),
    }
}
