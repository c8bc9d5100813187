use std::error::Error;
use std::fmt;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::NavigationConfig;
use crate::controllers::interactive::{
    ComputeOffloader, DeliveryEvent, DeliveryPort, FieldDelivery, SubmitError, ViewportAction,
    ViewportSession,
};
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::render_field::ports::colour_map::ColourMap;
use crate::core::actions::render_field::render_field::render_field;
use crate::core::data::viewport_params::ViewportParams;

#[derive(Debug)]
pub enum ExploreError {
    Submit(SubmitError),
    Input(io::Error),
    Present { path: PathBuf, source: io::Error },
    Timeout(Duration),
}

impl fmt::Display for ExploreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit(err) => write!(f, "could not submit viewport: {}", err),
            Self::Input(err) => write!(f, "could not read actions: {}", err),
            Self::Present { path, source } => {
                write!(f, "could not write frame {}: {}", path.display(), source)
            }
            Self::Timeout(timeout) => {
                write!(f, "computation did not settle within {:?}", timeout)
            }
        }
    }
}

impl Error for ExploreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Submit(err) => Some(err),
            Self::Input(err) => Some(err),
            Self::Present { source, .. } => Some(source),
            Self::Timeout(_) => None,
        }
    }
}

impl From<SubmitError> for ExploreError {
    fn from(err: SubmitError) -> Self {
        Self::Submit(err)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExploreSummary {
    pub actions_applied: usize,
    pub actions_rejected: usize,
    pub frames_written: usize,
    pub failures: usize,
    pub last_generation: u64,
}

/// Drives a [`ViewportSession`] from action lines and writes one frame per delivery.
///
/// Every action resubmits the whole viewport; superseded computations are
/// cancelled by the offloader, so fast input yields fewer frames than actions.
pub struct ExploreController<P: FilePresenterPort> {
    session: ViewportSession,
    offloader: ComputeOffloader,
    deliveries: Receiver<DeliveryEvent>,
    colour_map: Box<dyn ColourMap>,
    presenter: P,
    output_dir: PathBuf,
    settle_timeout: Duration,
    summary: ExploreSummary,
}

impl<P: FilePresenterPort> ExploreController<P> {
    pub fn new(
        params: ViewportParams,
        navigation: NavigationConfig,
        colour_map: Box<dyn ColourMap>,
        presenter: P,
        output_dir: PathBuf,
    ) -> Self {
        let (sender, deliveries) = mpsc::channel::<DeliveryEvent>();
        let port: Arc<dyn DeliveryPort> = Arc::new(sender);

        Self {
            session: ViewportSession::new(params, navigation),
            offloader: ComputeOffloader::new(port),
            deliveries,
            colour_map,
            presenter,
            output_dir,
            settle_timeout: Duration::from_secs(300),
            summary: ExploreSummary::default(),
        }
    }

    #[must_use]
    pub fn with_settle_timeout(mut self, timeout: Duration) -> Self {
        self.settle_timeout = timeout;
        self
    }

    /// Renders the initial view, applies every action line from `input`, then
    /// waits for the last computation before returning.
    ///
    /// Lines are key names (`ArrowLeft`, `" "`, `Alt`, ...) or action words
    /// (`left`, `zoom-in`, ...). Unknown lines are logged and skipped, as are
    /// actions that would leave the viewport invalid.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<ExploreSummary, ExploreError> {
        self.offloader.submit(self.session.params())?;

        for line in input.lines() {
            let line = line.map_err(ExploreError::Input)?;

            if let Some(action) = parse_action_line(&line) {
                match self.session.apply(action) {
                    Ok(params) => {
                        let generation = self.offloader.submit(params)?;
                        self.summary.actions_applied += 1;
                        debug!("{} -> generation {}", action, generation);
                    }
                    Err(err) => {
                        warn!("ignoring {}: {}", action, err);
                        self.summary.actions_rejected += 1;
                    }
                }
            }

            self.drain_deliveries()?;
        }

        if !self.offloader.wait_until_idle(self.settle_timeout) {
            return Err(ExploreError::Timeout(self.settle_timeout));
        }
        self.drain_deliveries()?;

        info!(
            "Explored {} actions ({} rejected): {} frames written, {} failures",
            self.summary.actions_applied,
            self.summary.actions_rejected,
            self.summary.frames_written,
            self.summary.failures
        );

        Ok(self.summary)
    }

    fn drain_deliveries(&mut self) -> Result<(), ExploreError> {
        while let Ok(event) = self.deliveries.try_recv() {
            // the offloader already drops stale results, this guards frame order
            if event.generation() <= self.summary.last_generation {
                debug!("skipping out-of-order generation {}", event.generation());
                continue;
            }
            self.summary.last_generation = event.generation();

            match event {
                DeliveryEvent::Field(delivery) => self.present(&delivery)?,
                DeliveryEvent::Failure(failure) => {
                    warn!("{}", failure);
                    self.summary.failures += 1;
                }
            }
        }

        Ok(())
    }

    fn present(&mut self, delivery: &FieldDelivery) -> Result<(), ExploreError> {
        let path = self
            .output_dir
            .join(format!("frame_{:04}.ppm", delivery.generation));
        let buffer = render_field(&delivery.field, self.colour_map.as_ref());

        self.presenter
            .present(&buffer, &path)
            .map_err(|source| ExploreError::Present {
                path: path.clone(),
                source,
            })?;

        info!(
            "Frame {}: zoom {}, offset ({}, {}), {} iterations, computed in {:?} -> {}",
            delivery.generation,
            delivery.params.zoom,
            delivery.params.center_offset.re,
            delivery.params.center_offset.im,
            delivery.params.max_iterations,
            delivery.compute_duration,
            path.display()
        );
        self.summary.frames_written += 1;

        Ok(())
    }
}

fn parse_action_line(line: &str) -> Option<ViewportAction> {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(action) =
        ViewportAction::from_key(line).or_else(|| ViewportAction::from_key(line.trim()))
    {
        return Some(action);
    }

    if line.trim().is_empty() {
        return None;
    }

    match line.parse::<ViewportAction>() {
        Ok(action) => Some(action),
        Err(err) => {
            warn!("{}", err);
            None
        }
    }
}
