/// Palette - colour parsing and normalization

use crate::error::{Error, Result};

/// Default four-colour palette
pub const DEFAULT_PALETTE: [u32; 4] = [0x6ec3f4, 0x3a3aff, 0xff61ab, 0xe63946];

/// Split `0xRRGGBB` into normalized RGB components
pub fn normalize_color(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Parse `#rgb`, `#rrggbb` or `0xrrggbb` (surrounding whitespace ignored)
pub fn parse_color(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let digits = if let Some(rest) = trimmed.strip_prefix('#') {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        if rest.len() != 6 {
            return Err(invalid(text));
        }
        rest
    } else {
        return Err(invalid(text));
    };

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid(text));
    }

    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        _ => return Err(invalid(text)),
    };
    u32::from_str_radix(&expanded, 16).map_err(|_| invalid(text))
}

/// Parse every entry of `colors`, stopping at the first malformed one
pub fn parse_palette<I, S>(colors: I) -> Result<Vec<u32>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    colors.into_iter().map(|c| parse_color(c.as_ref())).collect()
}

fn invalid(text: &str) -> Error {
    Error::InvalidResource(format!("'{}' is not a colour (expected #rgb, #rrggbb or 0xrrggbb)", text))
}

#[cfg(test)]
#[path = "palette_tests.rs"]
mod tests;
