use crate::core::data::colour::Colour;
use crate::core::data::progression_field::Progression;

pub trait ColourMap: Send + Sync {
    fn map(&self, progression: Progression) -> Colour;

    fn display_name(&self) -> &str;
}

impl ColourMap for Box<dyn ColourMap> {
    fn map(&self, progression: Progression) -> Colour {
        (**self).map(progression)
    }

    fn display_name(&self) -> &str {
        (**self).display_name()
    }
}
