use super::config::ConfigError;
use glam::Vec3;
use rand::Rng;
use serde::Deserialize;

/// How particle colors are drawn from the palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Lerp between the first two colors with a random per-particle ratio.
    #[default]
    Blend,
    /// Uniform random choice among all palette colors.
    Pick,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Vec3>,
    mode: ColorMode,
}

impl Palette {
    pub fn from_hex(hex: &[String], mode: ColorMode) -> Result<Self, ConfigError> {
        let colors = hex
            .iter()
            .map(|h| parse_hex(h))
            .collect::<Result<Vec<_>, _>>()?;
        if colors.is_empty() {
            return Err(ConfigError::PaletteSize {
                got: 0,
                max: super::constants::MAX_PALETTE_COLORS,
            });
        }
        Ok(Self { colors, mode })
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        match (self.mode, self.colors.as_slice()) {
            (_, [only]) => *only,
            (ColorMode::Blend, [a, b, ..]) => a.lerp(*b, rng.gen::<f32>()),
            (ColorMode::Pick, colors) => colors[rng.gen_range(0..colors.len())],
            (ColorMode::Blend, []) => Vec3::ONE,
        }
    }

    /// Deterministic assignment used for shapes: cycle through the palette.
    pub fn cycle(&self, index: usize) -> Vec3 {
        self.colors[index % self.colors.len()]
    }
}

/// Parse `#RRGGBB`, `RRGGBB`, `0xRRGGBB` or `#RGB` into linear 0..1 floats.
pub fn parse_hex(input: &str) -> Result<Vec3, ConfigError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let invalid = || ConfigError::InvalidColor(input.to_string());
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    let (r, g, b) = match digits.len() {
        6 => ((value >> 16) & 0xFF, (value >> 8) & 0xFF, value & 0xFF),
        3 => (
            ((value >> 8) & 0xF) * 17,
            ((value >> 4) & 0xF) * 17,
            (value & 0xF) * 17,
        ),
        _ => return Err(invalid()),
    };
    Ok(Vec3::new(r as f32, g as f32, b as f32) / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parses_common_hex_forms() {
        let cyan = parse_hex("#00D4FF").unwrap();
        assert!((cyan - Vec3::new(0.0, 212.0 / 255.0, 1.0)).length() < 1e-6);
        assert_eq!(parse_hex("0x00d4ff").unwrap(), cyan);
        assert_eq!(parse_hex("00D4FF").unwrap(), cyan);
        assert_eq!(parse_hex("#fff").unwrap(), Vec3::ONE);
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#12345", "#GGGGGG", "#+12345", "rgb(0,0,0)"] {
            assert!(parse_hex(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn blend_stays_between_endpoints() {
        let palette = Palette::from_hex(
            &["#000000".to_string(), "#FFFFFF".to_string()],
            ColorMode::Blend,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let c = palette.sample(&mut rng);
            assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
            // grey ramp: all channels equal
            assert!((c.x - c.y).abs() < 1e-6 && (c.y - c.z).abs() < 1e-6);
        }
    }

    #[test]
    fn pick_only_returns_palette_entries() {
        let hex: Vec<String> = ["#6366F1", "#22D3EE", "#F472B6"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let palette = Palette::from_hex(&hex, ColorMode::Pick).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let c = palette.sample(&mut rng);
            assert!(palette.colors().contains(&c));
        }
    }
}
