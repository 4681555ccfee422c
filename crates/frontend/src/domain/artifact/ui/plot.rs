//! Pure geometry for the SVG function plot.

pub const PLOT_WIDTH: f64 = 600.0;
pub const PLOT_HEIGHT: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    pub fn x_to_px(&self, x: f64) -> f64 {
        (x - self.x_min) / (self.x_max - self.x_min) * PLOT_WIDTH
    }

    pub fn y_to_px(&self, y: f64) -> f64 {
        // SVG y grows downward.
        PLOT_HEIGHT - (y - self.y_min) / (self.y_max - self.y_min) * PLOT_HEIGHT
    }
}

/// Y range from explicit bounds or the finite samples, padded slightly so
/// the curve does not hug the frame. `None` when no sample is finite and
/// no bounds are given.
pub fn y_range(
    samples: &[(f64, Option<f64>)],
    y_min: Option<f64>,
    y_max: Option<f64>,
) -> Option<(f64, f64)> {
    let (mut lo, mut hi) = match (y_min, y_max) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => {
            let finite: Vec<f64> = samples.iter().filter_map(|p| p.1).collect();
            if finite.is_empty() && (y_min.is_none() || y_max.is_none()) {
                return None;
            }
            let auto_lo = finite.iter().cloned().fold(f64::INFINITY, f64::min);
            let auto_hi = finite.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let pad = ((auto_hi - auto_lo).abs() * 0.05).max(1e-9);
            (
                y_min.unwrap_or(auto_lo - pad),
                y_max.unwrap_or(auto_hi + pad),
            )
        }
    };
    if lo == hi {
        lo -= 1.0;
        hi += 1.0;
    }
    (lo < hi).then_some((lo, hi))
}

/// SVG path data for the sampled curve. Every gap (or point outside the
/// viewport's y range by a wide margin) starts a new subpath, so poles
/// render as breaks instead of vertical spikes.
pub fn svg_path(samples: &[(f64, Option<f64>)], view: &Viewport) -> String {
    let mut path = String::new();
    let mut pen_down = false;
    let overshoot = (view.y_max - view.y_min) * 10.0;

    for (x, y) in samples {
        let y = match y {
            Some(y) if (y - view.y_min).abs() <= overshoot && (y - view.y_max).abs() <= overshoot => {
                *y
            }
            _ => {
                pen_down = false;
                continue;
            }
        };
        let px = view.x_to_px(*x);
        let py = view.y_to_px(y);
        if pen_down {
            path.push_str(&format!(" L {:.2} {:.2}", px, py));
        } else {
            if !path.is_empty() {
                path.push(' ');
            }
            path.push_str(&format!("M {:.2} {:.2}", px, py));
            pen_down = true;
        }
    }
    path
}

/// Evenly spaced grid line positions (in pixels) for one axis.
pub fn grid_positions(count: usize, extent: f64) -> Vec<f64> {
    (1..count)
        .map(|i| extent * (i as f64) / (count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> Viewport {
        Viewport {
            x_min: -2.0,
            x_max: 2.0,
            y_min: 0.0,
            y_max: 4.0,
        }
    }

    #[test]
    fn pixel_mapping_orientation() {
        let v = view();
        assert_eq!(v.x_to_px(-2.0), 0.0);
        assert_eq!(v.x_to_px(2.0), PLOT_WIDTH);
        // y is flipped: the max value maps to the top of the plot.
        assert_eq!(v.y_to_px(4.0), 0.0);
        assert_eq!(v.y_to_px(0.0), PLOT_HEIGHT);
    }

    #[test]
    fn gaps_start_new_subpaths() {
        let samples = vec![
            (-2.0, Some(4.0)),
            (-1.0, Some(1.0)),
            (0.0, None),
            (1.0, Some(1.0)),
            (2.0, Some(4.0)),
        ];
        let path = svg_path(&samples, &view());
        assert_eq!(path.matches('M').count(), 2);
        assert_eq!(path.matches('L').count(), 2);
    }

    #[test]
    fn explicit_bounds_win_over_samples() {
        let samples = vec![(0.0, Some(100.0))];
        assert_eq!(y_range(&samples, Some(-5.0), Some(5.0)), Some((-5.0, 5.0)));
    }

    #[test]
    fn auto_range_pads_and_handles_flat_curves() {
        let samples = vec![(0.0, Some(2.0)), (1.0, Some(2.0))];
        let (lo, hi) = y_range(&samples, None, None).unwrap();
        assert!(lo < 2.0 && hi > 2.0);
    }

    #[test]
    fn all_gap_curve_has_no_range() {
        let samples = vec![(0.0, None), (1.0, None)];
        assert_eq!(y_range(&samples, None, None), None);
    }
}
