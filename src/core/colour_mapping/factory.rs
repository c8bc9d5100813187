use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::actions::render_field::ports::colour_map::ColourMap;
use crate::core::colour_mapping::kinds::ColourMapKinds;
use crate::core::colour_mapping::palette::{Palette, PaletteStop};
use crate::core::colour_mapping::red_ramp::RedRamp;
use crate::core::data::colour::Colour;

pub const RANDOM_PALETTE_STOPS: usize = 10;

const SPECTRUM_STOPS: [PaletteStop; 3] = [
    PaletteStop::new(0.0, Colour::new(0, 0, 0)),
    PaletteStop::new(0.5, Colour::new(0, 255, 0)),
    PaletteStop::new(1.0, Colour::new(0, 0, 255)),
];

const FIRE_STOPS: [PaletteStop; 4] = [
    PaletteStop::new(0.0, Colour::new(0, 0, 0)),
    PaletteStop::new(0.33, Colour::new(255, 0, 0)),
    PaletteStop::new(0.66, Colour::new(255, 255, 0)),
    PaletteStop::new(1.0, Colour::new(255, 255, 255)),
];

fn built_in_palette(kind: ColourMapKinds, stops: &[PaletteStop]) -> Palette {
    Palette::new(kind.display_name(), stops.to_vec()).expect("built-in palette stops are valid")
}

/// Builds the colour map for `kind`. `seed` only affects [`ColourMapKinds::Random`].
#[must_use]
pub fn colour_map_factory(kind: ColourMapKinds, seed: u64) -> Box<dyn ColourMap> {
    match kind {
        ColourMapKinds::Red => Box::new(RedRamp),
        ColourMapKinds::Spectrum => Box::new(built_in_palette(kind, &SPECTRUM_STOPS)),
        ColourMapKinds::Fire => Box::new(built_in_palette(kind, &FIRE_STOPS)),
        ColourMapKinds::Random => {
            let mut rng = StdRng::seed_from_u64(seed);
            let palette = Palette::random(kind.display_name(), RANDOM_PALETTE_STOPS, &mut rng)
                .expect("random palette has at least one stop");

            Box::new(palette)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_match_between_kind_and_concrete() {
        for &kind in ColourMapKinds::ALL {
            let map = colour_map_factory(kind, 0);
            assert_eq!(map.display_name(), kind.display_name());
        }
    }

    #[test]
    fn every_map_paints_inside_points_black() {
        for &kind in ColourMapKinds::ALL {
            let map = colour_map_factory(kind, 3);
            assert_eq!(map.map(None), Colour::BLACK, "{} should paint None black", kind);
        }
    }

    #[test]
    fn spectrum_matches_reference_quarter_point() {
        let map = colour_map_factory(ColourMapKinds::Spectrum, 0);

        assert_eq!(map.map(Some(0.25)), Colour::new(0, 128, 0));
    }

    #[test]
    fn fire_ends_white() {
        let map = colour_map_factory(ColourMapKinds::Fire, 0);

        assert_eq!(map.map(Some(1.0)), Colour::new(255, 255, 255));
    }

    #[test]
    fn random_map_depends_on_seed_only() {
        let a = colour_map_factory(ColourMapKinds::Random, 11);
        let b = colour_map_factory(ColourMapKinds::Random, 11);

        for i in 1..=20 {
            let progression = Some(f64::from(i) / 20.0);
            assert_eq!(a.map(progression), b.map(progression));
        }
    }
}
