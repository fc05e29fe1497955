/// Named easing curves used by timeline segments.
///
/// Every curve maps 0 to 0 and 1 to 1; inputs are clamped first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    QuadIn,
    /// Default curve of a segment that names none.
    #[default]
    QuadOut,
    QuadInOut,
    CubicOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::ExpoIn => expo_in(t),
            Easing::ExpoOut => 1.0 - expo_in(1.0 - t),
            Easing::ExpoInOut => {
                if t < 0.5 {
                    expo_in(t * 2.0) / 2.0
                } else {
                    1.0 - expo_in((1.0 - t) * 2.0) / 2.0
                }
            }
        }
    }
}

#[inline]
fn expo_in(t: f32) -> f32 {
    if t <= 0.0 { 0.0 } else { 2.0_f32.powf(10.0 * (t - 1.0)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 8] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicOut,
        Easing::ExpoIn,
        Easing::ExpoOut,
        Easing::ExpoInOut,
    ];

    #[test]
    fn endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in ALL {
            let mut last = 0.0;
            for i in 0..=1000 {
                let v = easing.apply(i as f32 / 1000.0);
                assert!(v >= last, "{easing:?} decreased at step {i}");
                last = v;
            }
        }
    }

    #[test]
    fn expo_out_front_loads_progress() {
        assert!(Easing::ExpoOut.apply(0.2) > 0.7);
        assert!(Easing::ExpoIn.apply(0.2) < 0.01);
    }
}
