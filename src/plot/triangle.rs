// Slope-triangle annotation for log-log convergence plots: a right triangle
// whose hypotenuse rises `rise` decades per decade, anchored at a data
// coordinate. Inverted orientation: the legs sit below and right of the
// hypotenuse.

pub struct SlopeTriangle {
    pub anchor: (f64, f64),
    pub size: f64,
    pub rise: u32,
}

pub struct TriangleSketch {
    // closed outline in data coordinates: anchor, run corner, rise corner
    pub outline: Vec<(f64, f64)>,
    pub run_label: ((f64, f64), String),
    pub rise_label: ((f64, f64), String),
}

// a unit-size triangle spans a tenth of the x extent
const WIDTH_FRACTION: f64 = 0.1;

impl SlopeTriangle {
    pub fn sketch(&self, x_extent: (f64, f64)) -> TriangleSketch {
        let decades = (x_extent.1 / x_extent.0).log10().abs().max(f64::EPSILON);
        let width = self.size * WIDTH_FRACTION * decades;

        let (x0, y0) = self.anchor;
        let x1 = x0 * 10f64.powf(width);
        let y1 = y0 * 10f64.powf(self.rise as f64 * width);

        let run_mid = (x0 * x1).sqrt();
        let rise_mid = (y0 * y1).sqrt();

        TriangleSketch {
            outline: vec![(x0, y0), (x1, y0), (x1, y1), (x0, y0)],
            run_label: ((run_mid, y0 * 10f64.powf(-0.09)), "1".to_string()),
            rise_label: ((x1 * 10f64.powf(0.015), rise_mid), self.rise.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn outline_encodes_the_slope() {
        let triangle = SlopeTriangle {
            anchor: (1.0e-2, 1.0e-3),
            size: 0.5,
            rise: 2,
        };
        let sketch = triangle.sketch((1.0e-3, 1.0e-1));

        // two decades of axis extent, half-size triangle: 0.1 decades wide
        let width = 0.5 * WIDTH_FRACTION * 2.0;
        assert_eq!(sketch.outline.len(), 4);
        let (x0, y0) = sketch.outline[0];
        let (x1, y1a) = sketch.outline[1];
        let (x1b, y1) = sketch.outline[2];
        assert_relative_eq!(x0, 1.0e-2);
        assert_relative_eq!(y0, 1.0e-3);
        assert_relative_eq!(x1, 1.0e-2 * 10f64.powf(width), max_relative = 1e-12);
        assert_relative_eq!(x1b, x1);
        assert_relative_eq!(y1a, y0);
        assert_relative_eq!(y1, 1.0e-3 * 10f64.powf(2.0 * width), max_relative = 1e-12);
        assert_eq!(sketch.outline[3], sketch.outline[0]);
    }

    #[test]
    fn labels_name_run_and_rise() {
        let triangle = SlopeTriangle {
            anchor: (1.0e-2, 1.0e-3),
            size: 0.5,
            rise: 4,
        };
        let sketch = triangle.sketch((1.0e-3, 1.0e-1));
        assert_eq!(sketch.run_label.1, "1");
        assert_eq!(sketch.rise_label.1, "4");
        // run label sits under the horizontal leg
        assert!(sketch.run_label.0 .1 < 1.0e-3);
        // rise label sits right of the vertical leg
        assert!(sketch.rise_label.0 .0 > sketch.outline[1].0);
    }
}
