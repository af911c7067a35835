use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::config::PlanetConfig;
use crate::error::TextureError;
use crate::planet::PlanetSampler;
use crate::raster::TextureSet;

// Outcome of one scheduler tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    More,
    Done,
    Cancelled,
}

// Cancelling from any clone stops the pass at its next tick
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
enum BuildState {
    Pending { cursor: u32, maps: TextureSet },
    // Holds the maps until the caller takes them
    Finished(Option<TextureSet>),
    Cancelled,
}

#[derive(Debug)]
pub struct TextureBuilder {
    sampler: PlanetSampler,
    chunk_rows: u32,
    state: BuildState,
    ticks: u32,
    cancel: CancelToken,
}

impl TextureBuilder {
    pub fn new(config: &PlanetConfig) -> Result<Self, TextureError> {
        let sampler = PlanetSampler::new(config)?;
        let maps = TextureSet::new(sampler.width(), sampler.height());
        Ok(Self {
            sampler,
            chunk_rows: config.chunk_rows,
            state: BuildState::Pending { cursor: 0, maps },
            ticks: 0,
            cancel: CancelToken::new(),
        })
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    // Renders one chunk of rows. The tick that writes the last row finalises;
    // later calls do no work.
    pub fn step(&mut self) -> Step {
        if self.cancel.is_cancelled() {
            self.abandon();
        }

        let (next, step) = match std::mem::replace(&mut self.state, BuildState::Cancelled) {
            BuildState::Pending { cursor, mut maps } => {
                let height = self.sampler.height();
                let end = cursor.saturating_add(self.chunk_rows).min(height);
                self.sampler.render_rows(cursor..end, &mut maps);
                self.ticks += 1;
                debug!(rows = ?(cursor..end), height, "rendered planet rows");

                if end < height {
                    (BuildState::Pending { cursor: end, maps }, Step::More)
                } else {
                    info!(
                        width = self.sampler.width(),
                        height,
                        ticks = self.ticks,
                        "planet textures finalised"
                    );
                    (BuildState::Finished(Some(maps)), Step::Done)
                }
            }
            finished @ BuildState::Finished(_) => (finished, Step::Done),
            BuildState::Cancelled => (BuildState::Cancelled, Step::Cancelled),
        };

        self.state = next;
        step
    }

    // Steps until the pass leaves the pending state
    pub fn run_to_completion(&mut self) -> Step {
        loop {
            match self.step() {
                Step::More => continue,
                other => return other,
            }
        }
    }

    // Drops a pending pass's buffers; a finished pass keeps its maps
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.abandon();
    }

    fn abandon(&mut self) {
        if let BuildState::Pending { cursor, .. } = self.state {
            info!(rows_done = cursor, "planet generation cancelled");
            self.state = BuildState::Cancelled;
        }
    }

    pub fn take_textures(&mut self) -> Option<TextureSet> {
        match &mut self.state {
            BuildState::Finished(maps) => maps.take(),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, BuildState::Finished(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.state, BuildState::Cancelled)
    }

    // Ticks that rendered rows
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn rows_done(&self) -> u32 {
        match self.state {
            BuildState::Pending { cursor, .. } => cursor,
            BuildState::Finished(_) => self.sampler.height(),
            BuildState::Cancelled => 0,
        }
    }

    pub fn progress(&self) -> f32 {
        self.rows_done() as f32 / self.sampler.height() as f32
    }
}
