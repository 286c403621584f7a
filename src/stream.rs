use std::rc::Rc;
use rerun::{Color, Points3D, RecordingStream, RecordingStreamResult, TextLog};
use crate::model::StructuredSurface;
use crate::statistics::ElevationSummary;

const POINT_RADIUS: f32 = 0.5;

/// Visual debugging sink for the reconstruction stages.
pub trait Stream {
    fn stream_message(&self, path: &str, message: &str) -> RecordingStreamResult<()>;

    fn stream_scalar(&self, path: &str, scalar: f64) -> RecordingStreamResult<()>;

    fn stream_surface(&self, path: &str, surface: &StructuredSurface) -> RecordingStreamResult<()>;
}

impl Stream for RecordingStream {
    fn stream_message(&self, path: &str, message: &str) -> RecordingStreamResult<()> {
        self.log(path, &TextLog::new(message))
    }

    fn stream_scalar(&self, path: &str, scalar: f64) -> RecordingStreamResult<()> {
        self.log(path, &rerun::Scalar::new(scalar))
    }

    fn stream_surface(&self, path: &str, surface: &StructuredSurface) -> RecordingStreamResult<()> {
        let positions: Vec<[f32; 3]> = surface.points().iter()
            .map(|point| [point.x as f32, point.y as f32, point.z as f32])
            .collect();
        let colors = elevation_colors(surface);
        self.log(path, &Points3D::new(positions).with_colors(colors).with_radii([POINT_RADIUS]))
    }
}

impl Stream for Option<Rc<RecordingStream>> {
    fn stream_message(&self, path: &str, message: &str) -> RecordingStreamResult<()> {
        match self {
            Some(stream) => stream.stream_message(path, message),
            None => Ok(())
        }
    }

    fn stream_scalar(&self, path: &str, scalar: f64) -> RecordingStreamResult<()> {
        match self {
            Some(stream) => stream.stream_scalar(path, scalar),
            None => Ok(())
        }
    }

    fn stream_surface(&self, path: &str, surface: &StructuredSurface) -> RecordingStreamResult<()> {
        match self {
            Some(stream) => stream.stream_surface(path, surface),
            None => Ok(())
        }
    }
}

/// Blue (low) to red (high) ramp over the surface's emitted elevations.
fn elevation_colors(surface: &StructuredSurface) -> Vec<Color> {
    let Some(summary) = ElevationSummary::of_surface(surface) else {
        return vec![];
    };
    surface.points().iter()
        .map(|point| {
            let (r, g, b) = ramp(normalize(point.z, &summary));
            Color::from_rgb(r, g, b)
        })
        .collect()
}

fn normalize(value: f64, summary: &ElevationSummary) -> f64 {
    if summary.range() > 0.0 {
        ((value - summary.min) / summary.range()).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

fn ramp(t: f64) -> (u8, u8, u8) {
    let r = (255.0 * t).round() as u8;
    let g = (255.0 * (1.0 - (2.0 * t - 1.0).abs())).round() as u8;
    let b = (255.0 * (1.0 - t)).round() as u8;
    (r, g, b)
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use crate::gapfilling::fill;
    use crate::model::HeightGrid;
    use crate::surface::build;
    use super::*;

    #[test]
    fn test_ramp_ends() {
        assert_eq!(ramp(0.0), (0, 0, 255));
        assert_eq!(ramp(0.5), (128, 255, 128));
        assert_eq!(ramp(1.0), (255, 0, 0));
    }

    #[test]
    fn test_colors_per_point() {
        let grid = fill(HeightGrid::from_array(array![[0.0, 1.0], [2.0, 3.0]]).unwrap()).unwrap();
        let surface = build(&grid);
        let colors = elevation_colors(&surface);
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], Color::from_rgb(0, 0, 255));
        assert_eq!(colors[3], Color::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_flat_surface_is_mid_ramp() {
        let grid = fill(HeightGrid::from_array(array![[4.0, 4.0]]).unwrap()).unwrap();
        let colors = elevation_colors(&build(&grid));
        assert_eq!(colors, vec![Color::from_rgb(128, 255, 128); 2]);
    }

    #[test]
    fn test_disabled_stream_is_noop() {
        let grid = fill(HeightGrid::from_array(array![[1.0, 2.0]]).unwrap()).unwrap();
        let stream: Option<Rc<RecordingStream>> = None;
        assert!(stream.stream_message("log", "nothing").is_ok());
        assert!(stream.stream_scalar("value", 1.0).is_ok());
        assert!(stream.stream_surface("surface", &build(&grid)).is_ok());
    }

    #[test]
    fn test_memory_recording() {
        let (recording, _storage) = rerun::RecordingStreamBuilder::new("heightfield-test").memory().unwrap();
        let grid = fill(HeightGrid::from_array(array![[0.0, f32::NAN], [2.0, 3.0]]).unwrap()).unwrap();
        let surface = build(&grid);
        assert!(recording.stream_surface("surface", &surface).is_ok());
        assert!(recording.stream_message("log", "filled").is_ok());
        assert!(recording.stream_scalar("invalid", 1.0).is_ok());

        let shared = Some(Rc::new(recording));
        assert!(shared.stream_surface("surface", &surface).is_ok());
    }
}
