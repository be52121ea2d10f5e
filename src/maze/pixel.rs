use crossterm::style::{Color, Stylize};

use std::fmt;

/// One position of the maze bitmap: open floor or wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pixel {
    Open,
    Wall,
}

impl Pixel {
    /// The width of each pixel when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Pixel::Open => "  ".with(Color::Reset),
            Pixel::Wall => "⬜".with(Color::White),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Pixel::CELL_WIDTH as usize,
                "Each pixel must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
