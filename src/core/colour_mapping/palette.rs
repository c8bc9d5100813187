use std::error::Error;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::actions::render_field::ports::colour_map::ColourMap;
use crate::core::colour_mapping::interpolate::{interpolate_colour, normalize};
use crate::core::data::colour::Colour;
use crate::core::data::progression_field::Progression;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PaletteError {
    Empty,
    PositionOutOfRange { position: f64 },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "a palette needs at least one stop"),
            Self::PositionOutOfRange { position } => {
                write!(f, "palette stop position {} is outside [0, 1]", position)
            }
        }
    }
}

impl Error for PaletteError {}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteStop {
    pub position: f64,
    pub colour: Colour,
}

impl PaletteStop {
    #[must_use]
    pub const fn new(position: f64, colour: Colour) -> Self {
        Self { position, colour }
    }
}

/// Piecewise-linear gradient over `[0, 1]`.
///
/// Stops are sorted by position once, at construction. Two stops sharing a
/// position are a caller error; lookups then pick whichever sorts first.
///
/// Lookups are cyclic at the edges: a progression below the first stop
/// blends from the last stop into the first one, and a progression above the
/// last stop blends from the last stop towards the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    stops: Vec<PaletteStop>,
}

impl Palette {
    pub fn new(
        name: impl Into<String>,
        mut stops: Vec<PaletteStop>,
    ) -> Result<Self, PaletteError> {
        if stops.is_empty() {
            return Err(PaletteError::Empty);
        }

        if let Some(stop) = stops
            .iter()
            .find(|stop| !(0.0..=1.0).contains(&stop.position))
        {
            return Err(PaletteError::PositionOutOfRange {
                position: stop.position,
            });
        }

        stops.sort_by(|a, b| a.position.total_cmp(&b.position));

        Ok(Self {
            name: name.into(),
            stops,
        })
    }

    /// `count` evenly spaced stops at `i / count`, each with a random colour.
    pub fn random<R: Rng + ?Sized>(
        name: impl Into<String>,
        count: usize,
        rng: &mut R,
    ) -> Result<Self, PaletteError> {
        let stops = (0..count)
            .map(|i| {
                PaletteStop::new(
                    i as f64 / count as f64,
                    Colour::new(rng.r#gen(), rng.r#gen(), rng.r#gen()),
                )
            })
            .collect();

        Self::new(name, stops)
    }

    #[must_use]
    pub fn stops(&self) -> &[PaletteStop] {
        &self.stops
    }

    #[must_use]
    pub fn colour_at(&self, progression: Progression) -> Colour {
        let Some(progression) = progression else {
            return Colour::BLACK;
        };

        let (start, end) = self.bracket(progression);
        let t = normalize(progression, (start.position, end.position));

        interpolate_colour(start.colour, end.colour, t)
    }

    fn bracket(&self, progression: f64) -> (PaletteStop, PaletteStop) {
        let last = self.stops.len() - 1;

        match self
            .stops
            .iter()
            .position(|stop| progression <= stop.position)
        {
            Some(0) => (self.stops[last], self.stops[0]),
            Some(end) => (self.stops[end - 1], self.stops[end]),
            None => (self.stops[last], self.stops[0]),
        }
    }
}

impl ColourMap for Palette {
    fn map(&self, progression: Progression) -> Colour {
        self.colour_at(progression)
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
