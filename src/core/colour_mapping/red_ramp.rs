use crate::core::actions::render_field::ports::colour_map::ColourMap;
use crate::core::colour_mapping::interpolate::to_component_default;
use crate::core::colour_mapping::kinds::ColourMapKinds;
use crate::core::data::colour::Colour;
use crate::core::data::progression_field::Progression;

/// Red channel proportional to the progression, green and blue off.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedRamp;

impl ColourMap for RedRamp {
    fn map(&self, progression: Progression) -> Colour {
        match progression {
            Some(progression) => Colour::new(to_component_default(progression), 0, 0),
            None => Colour::BLACK,
        }
    }

    fn display_name(&self) -> &str {
        ColourMapKinds::Red.display_name()
    }
}
