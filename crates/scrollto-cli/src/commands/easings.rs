use anyhow::Result;

use scrollto_core::scroll::EasingTypeExt;
use scrollto_core::EasingType;

const SAMPLES: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];
const CURVE_WIDTH: usize = 24;
const CURVE_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn run() -> Result<()> {
    println!("Easings ({}):\n", EasingType::ALL.len());
    println!("  {:<14} {:>5} {:>5} {:>5} {:>5} {:>5}", "name", "0", "0.25", "0.5", "0.75", "1");

    for easing in EasingType::ALL {
        let samples: Vec<String> = SAMPLES
            .iter()
            .map(|&t| format!("{:>5.2}", easing.apply(t)))
            .collect();
        let default = if easing == EasingType::default() {
            " (default)"
        } else {
            ""
        };
        println!("  {:<14} {}  {}{}", easing.name(), samples.join(" "), curve(easing), default);
    }

    Ok(())
}

/// One-line sparkline of the curve over [0, 1]
fn curve(easing: EasingType) -> String {
    let top = (CURVE_GLYPHS.len() - 1) as f64;
    (0..CURVE_WIDTH)
        .map(|i| {
            let t = i as f64 / (CURVE_WIDTH - 1) as f64;
            let level = (easing.apply(t) * top).round().clamp(0.0, top) as usize;
            CURVE_GLYPHS[level]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_spans_full_range() {
        let line: Vec<char> = curve(EasingType::Linear).chars().collect();
        assert_eq!(line.len(), CURVE_WIDTH);
        assert_eq!(line[0], '▁');
        assert_eq!(line[CURVE_WIDTH - 1], '█');
    }

    #[test]
    fn test_ease_in_starts_flat() {
        let line: Vec<char> = curve(EasingType::CubicIn).chars().collect();
        assert_eq!(line[1], '▁');
        assert_eq!(line[2], '▁');
    }
}
