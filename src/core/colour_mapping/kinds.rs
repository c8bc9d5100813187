use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColourMapKinds {
    #[default]
    Red,
    Spectrum,
    Fire,
    Random,
}

impl ColourMapKinds {
    pub const ALL: &'static [Self] = &[Self::Red, Self::Spectrum, Self::Fire, Self::Random];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Red => "Red ramp",
            Self::Spectrum => "Spectrum",
            Self::Fire => "Fire gradient",
            Self::Random => "Random",
        }
    }

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Spectrum => "spectrum",
            Self::Fire => "fire",
            Self::Random => "random",
        }
    }
}

impl std::fmt::Display for ColourMapKinds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColourMap(pub String);

impl std::fmt::Display for UnknownColourMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let known: Vec<&str> = ColourMapKinds::ALL.iter().map(|kind| kind.id()).collect();
        write!(
            f,
            "unknown colour map '{}', expected one of: {}",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for UnknownColourMap {}

impl FromStr for ColourMapKinds {
    type Err = UnknownColourMap;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownColourMap(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_array_has_default_first() {
        assert_eq!(ColourMapKinds::ALL.first(), Some(&ColourMapKinds::default()));
    }

    #[test]
    fn ids_parse_back_to_kinds() {
        for &kind in ColourMapKinds::ALL {
            assert_eq!(kind.id().parse::<ColourMapKinds>(), Ok(kind));
        }
    }

    #[test]
    fn parsing_ignores_case() {
        assert_eq!("FIRE".parse::<ColourMapKinds>(), Ok(ColourMapKinds::Fire));
    }

    #[test]
    fn unknown_name_lists_choices() {
        let err = "plaid".parse::<ColourMapKinds>().unwrap_err();

        assert_eq!(
            err.to_string(),
            "unknown colour map 'plaid', expected one of: red, spectrum, fire, random"
        );
    }

    #[test]
    fn serde_uses_ids() {
        assert_eq!(
            serde_json::to_string(&ColourMapKinds::Spectrum).unwrap(),
            "\"spectrum\""
        );
        assert_eq!(
            serde_json::from_str::<ColourMapKinds>("\"random\"").unwrap(),
            ColourMapKinds::Random
        );
    }

    #[test]
    fn display_names_are_unique() {
        let names: Vec<&str> = ColourMapKinds::ALL
            .iter()
            .map(|k| k.display_name())
            .collect();
        for (i, name) in names.iter().enumerate() {
            for (j, other) in names.iter().enumerate() {
                if i != j {
                    assert_ne!(name, other, "Duplicate display name: {}", name);
                }
            }
        }
    }
}
