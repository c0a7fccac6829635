use std::time::Instant;

use canny_edge::{canny_with_stages, edge_points, CannyParams, ThresholdRatios};
use env_logger::Builder;
use image::{GrayImage, Luma};
use log::info;

fn main() {
    Builder::from_default_env().format_timestamp_nanos().init();

    // Synthetic scene: a bright disc on a horizontal ramp
    let (width, height) = (256u32, 192u32);
    let image = GrayImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - 128.0;
        let dy = y as f32 - 96.0;
        if dx * dx + dy * dy < 60.0 * 60.0 {
            Luma([220])
        } else {
            Luma([(x / 4) as u8])
        }
    });

    info!("Input image: {}x{}", width, height);

    for (low, high) in [(0.05, 0.09), (0.1, 0.2), (0.2, 0.4)] {
        let params = CannyParams {
            sigma: 1.4,
            kernel_size: 5,
            ratios: ThresholdRatios::new(low, high).expect("ratios in [0, 1]"),
            ..CannyParams::default()
        };

        let start = Instant::now();
        let stages = match canny_with_stages(&image, &params) {
            Ok(stages) => stages,
            Err(err) => {
                log::error!("canny failed: {err}");
                return;
            }
        };
        let elapsed = start.elapsed();

        let markers = params.markers;
        let weak = stages
            .classified
            .as_raw()
            .iter()
            .filter(|&&v| v == markers.weak())
            .count();
        let edges = edge_points(&stages.edges, markers);

        info!(
            "ratios low={low} high={high}: {weak} weak candidates, {} edge pixels in {elapsed:?}",
            edges.len()
        );
    }
}
