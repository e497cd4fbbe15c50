//! QR code rendering with block characters.
//!
//! Light modules are drawn, dark modules are left blank. On the usual dark
//! terminal background that yields dark-on-light modules scanners expect.

use std::io::{self, Write};

use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};
use thiserror::Error;

/// Modules of light border around the symbol.
pub const QUIET_ZONE: usize = 2;

/// Glyph set used to draw the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrStyle {
    /// Two vertically stacked modules per character cell.
    #[default]
    Compact,
    /// One full-block glyph per module, for scanning from further away.
    Big,
}

/// Failure to render a QR code.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode QR code: {0}")]
    Encode(QrError),

    #[error("failed to write QR code: {0}")]
    Io(#[from] io::Error),
}

/// Square grid of modules including the quiet zone.
struct Grid {
    size: usize,
    modules: Vec<Color>,
    width: usize,
}

impl Grid {
    fn new(code: &QrCode) -> Self {
        let width = code.width();
        Self {
            size: width + 2 * QUIET_ZONE,
            modules: code.to_colors(),
            width,
        }
    }

    /// Whether the module at `(x, y)` is light. Outside the grid is blank.
    fn is_light(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let inside = |v: usize| v >= QUIET_ZONE && v < QUIET_ZONE + self.width;
        if !inside(x) || !inside(y) {
            return Some(true);
        }
        let index = (y - QUIET_ZONE) * self.width + (x - QUIET_ZONE);
        Some(self.modules[index] == Color::Light)
    }
}

/// Write `data` as a low error-correction QR code to `out`.
pub fn render<W: Write>(data: &str, style: QrStyle, out: &mut W) -> Result<(), RenderError> {
    let code = QrCode::with_error_correction_level(data, EcLevel::L).map_err(RenderError::Encode)?;
    let grid = Grid::new(&code);

    match style {
        QrStyle::Big => {
            for y in 0..grid.size {
                let line: String = (0..grid.size)
                    .map(|x| match grid.is_light(x, y) {
                        Some(true) => "██",
                        _ => "  ",
                    })
                    .collect();
                writeln!(out, "{line}")?;
            }
        }
        QrStyle::Compact => {
            for y in (0..grid.size).step_by(2) {
                let line: String = (0..grid.size)
                    .map(|x| {
                        let top = grid.is_light(x, y).unwrap_or(false);
                        let bottom = grid.is_light(x, y + 1).unwrap_or(false);
                        match (top, bottom) {
                            (true, true) => '█',
                            (true, false) => '▀',
                            (false, true) => '▄',
                            (false, false) => ' ',
                        }
                    })
                    .collect();
                writeln!(out, "{line}")?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Render into a `String`.
pub fn render_to_string(data: &str, style: QrStyle) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    render(data, style, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://192.168.1.50:9000/myreport.pdf";

    fn symbol_width(data: &str) -> usize {
        QrCode::with_error_correction_level(data, EcLevel::L)
            .unwrap()
            .width()
    }

    #[test]
    fn big_draws_one_glyph_per_module() {
        let out = render_to_string(URL, QrStyle::Big).unwrap();
        let size = symbol_width(URL) + 2 * QUIET_ZONE;
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), size);
        for line in &lines {
            assert_eq!(line.chars().count(), size * 2);
        }
        // Quiet zone rows are solid.
        assert!(lines[0].chars().all(|c| c == '█'));
        assert!(lines[1].chars().all(|c| c == '█'));
        assert!(lines[size - 1].chars().all(|c| c == '█'));
    }

    #[test]
    fn compact_packs_two_rows_per_line() {
        let out = render_to_string(URL, QrStyle::Compact).unwrap();
        let size = symbol_width(URL) + 2 * QUIET_ZONE;
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), size.div_ceil(2));
        for line in &lines {
            assert_eq!(line.chars().count(), size);
            assert!(line.chars().all(|c| "█▀▄ ".contains(c)));
        }
        // Both quiet zone rows fold into the first line.
        assert!(lines[0].chars().all(|c| c == '█'));
        // Symbol sizes are odd, so the last line only has a top half.
        assert!(lines[lines.len() - 1].chars().all(|c| c == '▀'));
    }

    #[test]
    fn finder_pattern_is_dark_in_the_corner() {
        let out = render_to_string(URL, QrStyle::Big).unwrap();
        let row: Vec<char> = out.lines().nth(QUIET_ZONE).unwrap().chars().collect();
        // Left quiet zone is light, top-left finder module is dark.
        assert_eq!(row[0], '█');
        assert_eq!(row[QUIET_ZONE * 2], ' ');
    }

    #[test]
    fn oversized_data_is_an_encode_error() {
        let data = "x".repeat(8000);
        assert!(matches!(
            render_to_string(&data, QrStyle::Compact),
            Err(RenderError::Encode(_))
        ));
    }
}
