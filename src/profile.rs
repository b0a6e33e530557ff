use crate::raster::RasterStats;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct RenderStats {
    pub width: usize,
    pub height: usize,
    pub raster: RasterStats,
    pub cells_drawn: usize,

    pub total: Duration,
    pub clear: Duration,
    pub sample: Duration,
    pub resolve: Duration,
}

impl RenderStats {
    pub fn overlay_text(&self) -> String {
        fn ms(d: Duration) -> f32 {
            d.as_secs_f32() * 1000.0
        }

        format!(
            concat!(
                "grid={}x{} samples={} plotted={} occluded={} unlit={} cells={} ",
                "total={:.2}ms sample={:.2}ms resolve={:.2}ms",
            ),
            self.width,
            self.height,
            self.raster.samples,
            self.raster.plotted,
            self.raster.occluded,
            self.raster.unlit,
            self.cells_drawn,
            ms(self.total),
            ms(self.sample),
            ms(self.resolve),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_mentions_counts() {
        let stats = RenderStats {
            width: 80,
            height: 24,
            raster: RasterStats {
                samples: 10,
                plotted: 4,
                occluded: 3,
                unlit: 2,
                offscreen: 1,
            },
            cells_drawn: 4,
            total: Duration::from_micros(1500),
            ..RenderStats::default()
        };
        let text = stats.overlay_text();
        assert!(text.starts_with("grid=80x24 samples=10 plotted=4"));
        assert!(text.contains("total=1.50ms"));
    }
}
