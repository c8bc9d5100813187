use std::path::Path;
use std::time::Instant;

use log::info;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::compute_field::compute_field_parallel_rayon::compute_field_parallel_rayon;
use crate::core::actions::render_field::ports::colour_map::ColourMap;
use crate::core::actions::render_field::render_field::render_field;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::viewport_params::ViewportParams;

/// One-shot render of a single viewport to a file.
pub struct RenderController<P: FilePresenterPort> {
    presenter: P,
    buffer: Option<PixelBuffer>,
}

impl<P: FilePresenterPort> RenderController<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            buffer: None,
        }
    }

    pub fn generate(&mut self, params: &ViewportParams, colour_map: &dyn ColourMap) {
        info!(
            "Rendering {}x{} at zoom {} with {} max iterations ({})",
            params.width,
            params.height,
            params.zoom,
            params.max_iterations,
            colour_map.display_name()
        );

        let start = Instant::now();
        let field = compute_field_parallel_rayon(params);
        let duration = start.elapsed();

        info!("Field computed in {:?}", duration);

        self.buffer = Some(render_field(&field, colour_map));
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    /// Writes the last generated frame. Does nothing before [`generate`](Self::generate).
    pub fn write(&self, filepath: &Path) -> std::io::Result<()> {
        if let Some(buffer) = &self.buffer {
            self.presenter.present(buffer, filepath)?;
            info!("Wrote {}", filepath.display());
        }

        Ok(())
    }
}
