//! Sliding-window training pairs.

/// Windows of `lookback` consecutive values, each paired with the value
/// that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDataset {
    pub inputs: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

impl WindowDataset {
    /// Build every (window, next value) pair. Empty when `values` has no more
    /// than `lookback` entries.
    pub fn build(values: &[f64], lookback: usize) -> Self {
        if lookback == 0 || values.len() <= lookback {
            return Self {
                inputs: vec![],
                targets: vec![],
            };
        }

        let (inputs, targets) = values
            .windows(lookback + 1)
            .map(|w| (w[..lookback].to_vec(), w[lookback]))
            .unzip();

        Self { inputs, targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_pairs() {
        let ds = WindowDataset::build(&[1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.inputs[0], vec![1.0, 2.0]);
        assert_eq!(ds.targets[0], 3.0);
        assert_eq!(ds.inputs[1], vec![2.0, 3.0]);
        assert_eq!(ds.targets[1], 4.0);
    }

    #[test]
    fn test_too_short() {
        assert!(WindowDataset::build(&[1.0, 2.0], 2).is_empty());
        assert_eq!(WindowDataset::build(&[1.0, 2.0, 3.0], 2).len(), 1);
    }
}
