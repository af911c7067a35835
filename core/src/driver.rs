use tokio::task;

use crate::builder::{Step, TextureBuilder};
use crate::raster::TextureSet;

// One chunk per poll, yielding between chunks so other tasks on the thread
// keep running. `None` if the pass is cancelled.
pub async fn drive(mut builder: TextureBuilder) -> Option<TextureSet> {
    loop {
        match builder.step() {
            Step::More => task::yield_now().await,
            Step::Done => return builder.take_textures(),
            Step::Cancelled => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::drive;
    use crate::{PlanetConfig, TextureBuilder, generate};
    use tokio::runtime::Builder;

    fn runtime() -> tokio::runtime::Runtime {
        Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to build Tokio runtime")
    }

    #[test]
    fn driver_produces_same_maps_as_one_pass() {
        let config = PlanetConfig {
            chunk_rows: 5,
            ..PlanetConfig::with_size(16, 12)
        };
        let builder = TextureBuilder::new(&config).unwrap();
        let maps = runtime().block_on(drive(builder)).expect("pass completes");
        assert_eq!(maps, generate(&config).unwrap());
    }

    #[test]
    fn driver_returns_none_when_cancelled_up_front() {
        let builder = TextureBuilder::new(&PlanetConfig::with_size(16, 12)).unwrap();
        builder.cancel_token().cancel();
        assert!(runtime().block_on(drive(builder)).is_none());
    }

    #[test]
    fn driver_cancel_mid_pass() {
        let config = PlanetConfig {
            chunk_rows: 1,
            ..PlanetConfig::with_size(64, 512)
        };
        let builder = TextureBuilder::new(&config).unwrap();
        let token = builder.cancel_token();

        let result = runtime().block_on(async move {
            let handle = tokio::spawn(drive(builder));
            tokio::task::yield_now().await;
            token.cancel();
            handle.await.expect("driver task panicked")
        });
        assert!(result.is_none());
    }

    #[test]
    fn driver_interleaves_with_other_tasks() {
        let config = PlanetConfig {
            chunk_rows: 2,
            ..PlanetConfig::with_size(8, 16)
        };
        let builder = TextureBuilder::new(&config).unwrap();

        let (maps, counted) = runtime().block_on(async move {
            let pass = tokio::spawn(drive(builder));
            let mut counted = 0u32;
            while !pass.is_finished() {
                counted += 1;
                tokio::task::yield_now().await;
            }
            (pass.await.expect("driver task panicked"), counted)
        });
        assert!(maps.is_some());
        assert!(counted > 1);
    }
}
