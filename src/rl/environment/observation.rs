//! Observation Space
//!
//! Statically typed description of the environment inputs, plus the
//! encoding of price windows into normalized feature matrices.

use serde::Serialize;

use crate::domain::Candle;

/// How a window is presented to the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Open, high, low and close per row
    Candlestick,
    /// Open price only
    Line,
}

impl ChartKind {
    /// Number of feature channels per row
    pub fn channels(&self) -> usize {
        match self {
            ChartKind::Candlestick => 4,
            ChartKind::Line => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Candlestick => "candlestick",
            ChartKind::Line => "line",
        }
    }
}

/// One named input of the observation space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSpec {
    /// Input name, `Input_0`, `Input_1`, ...
    pub name: String,
    pub kind: ChartKind,
    /// Number of rows in the window
    pub window: usize,
    /// `[window, channels]`
    pub shape: [usize; 2],
    pub low: f64,
    pub high: f64,
}

/// All inputs, in window order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationSpace {
    pub inputs: Vec<InputSpec>,
}

impl ObservationSpace {
    /// The first window is a candlestick input, all later ones are line inputs
    pub fn from_windows(windows: &[usize]) -> Self {
        let inputs = windows
            .iter()
            .enumerate()
            .map(|(i, &window)| {
                let kind = if i == 0 {
                    ChartKind::Candlestick
                } else {
                    ChartKind::Line
                };
                InputSpec {
                    name: format!("Input_{i}"),
                    kind,
                    window,
                    shape: [window, kind.channels()],
                    low: 0.0,
                    high: 1.0,
                }
            })
            .collect();

        Self { inputs }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&InputSpec> {
        self.inputs.iter().find(|input| input.name == name)
    }
}

/// Encoded value of one input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputValue {
    pub name: String,
    pub kind: ChartKind,
    /// Row-major `[window][channels]` features in `[0, 1]`
    pub values: Vec<Vec<f64>>,
}

/// Observation returned by `reset` and `step`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub inputs: Vec<InputValue>,
}

impl Observation {
    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.inputs.iter().find(|input| input.name == name)
    }
}

/// Min-max normalize a window over its own price range.
///
/// A flat window has no range and maps to 0.5.
pub fn encode_window(spec: &InputSpec, candles: &[Candle]) -> InputValue {
    let rows: Vec<Vec<f64>> = candles
        .iter()
        .map(|c| match spec.kind {
            ChartKind::Candlestick => vec![c.open, c.high, c.low, c.close],
            ChartKind::Line => vec![c.open],
        })
        .collect();

    let (min, max) = rows
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let range = max - min;

    let values = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|v| {
                    if range > 0.0 {
                        ((v - min) / range).clamp(spec.low, spec.high)
                    } else {
                        0.5
                    }
                })
                .collect()
        })
        .collect();

    InputValue {
        name: spec.name.clone(),
        kind: spec.kind,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_from_windows() {
        let space = ObservationSpace::from_windows(&[64, 32, 16]);

        assert_eq!(space.len(), 3);
        assert_eq!(space.inputs[0].name, "Input_0");
        assert_eq!(space.inputs[0].kind, ChartKind::Candlestick);
        assert_eq!(space.inputs[0].shape, [64, 4]);
        assert_eq!(space.inputs[1].kind, ChartKind::Line);
        assert_eq!(space.get("Input_2").unwrap().shape, [16, 1]);
        assert!(space.get("Input_3").is_none());
    }

    #[test]
    fn test_encode_candlestick_range() {
        let spec = &ObservationSpace::from_windows(&[2]).inputs[0];
        let candles = vec![
            Candle::new(1.0, 2.0, 0.5, 1.5),
            Candle::new(1.5, 3.0, 1.0, 2.5),
        ];

        let value = encode_window(spec, &candles);

        assert_eq!(value.values.len(), 2);
        assert_eq!(value.values[0].len(), 4);
        // low of row 0 is the window minimum, high of row 1 the maximum
        assert_eq!(value.values[0][2], 0.0);
        assert_eq!(value.values[1][1], 1.0);
        assert!(value.values.iter().flatten().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_encode_flat_line() {
        let space = ObservationSpace::from_windows(&[3, 3]);
        let candles = vec![Candle::new(1.1, 1.2, 1.0, 1.1); 3];

        let value = encode_window(&space.inputs[1], &candles);

        assert_eq!(value.kind, ChartKind::Line);
        assert!(value.values.iter().all(|row| row == &vec![0.5]));
    }
}
