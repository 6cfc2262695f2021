use std::{
    io::{self, Write},
    thread,
    time::Duration,
};

use cgrid::{dims::Dims, paint::Paintable};
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand as _,
};

use crate::settings::Palette;

/// Draws anything [`Paintable`] as rows of palette symbols.
pub struct Renderer {
    palette: Palette,
    color: bool,
}

impl Renderer {
    pub fn new(palette: Palette, color: bool) -> Self {
        Self { palette, color }
    }

    pub fn draw(&self, canvas: &impl Paintable, out: &mut impl Write) -> io::Result<()> {
        let Dims(width, height) = canvas.size();
        let mut fg: Option<Color> = None;

        for y in 0..height {
            for x in 0..width {
                let glyph = self.palette.glyph(canvas.cell_view(Dims(x, y)));
                if self.color && glyph.color != fg {
                    out.queue(SetForegroundColor(glyph.color.unwrap_or(Color::Reset)))?;
                    fg = glyph.color;
                }
                out.queue(Print(glyph.symbol))?;
            }

            if fg.take().is_some() {
                out.queue(ResetColor)?;
            }
            out.queue(Print('\n'))?;
        }

        Ok(())
    }
}

/// Replays frames in place, hiding the cursor until dropped.
pub struct Animation<'a, W: Write> {
    out: &'a mut W,
    delay: Duration,
}

impl<'a, W: Write> Animation<'a, W> {
    pub fn new(out: &'a mut W, delay: Duration) -> io::Result<Self> {
        execute!(
            out,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(Self { out, delay })
    }

    pub fn show(&mut self, renderer: &Renderer, canvas: &impl Paintable) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(0, 0))?;
        renderer.draw(canvas, &mut *self.out)?;
        self.out.flush()?;

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(())
    }
}

impl<W: Write> Drop for Animation<'_, W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show);
    }
}

#[cfg(test)]
mod tests {
    use cgrid::{grid::text, paint::Solved};

    use super::*;

    #[test]
    fn plain_frame() {
        let grid = text::parse("#####\n#   #\n# # #\n# # #\n#####\n").unwrap();
        let path = [Dims(1, 1), Dims(2, 1), Dims(3, 1), Dims(3, 2), Dims(3, 3)];
        let renderer = Renderer::new(Palette::default(), false);

        let mut out = Vec::new();
        renderer.draw(&Solved::new(&grid, &path), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#####\n#S..#\n# #.#\n# #E#\n#####\n"
        );
    }

    #[test]
    fn grid_frame() {
        let grid = text::parse("###\n# #\n###\n").unwrap();
        let renderer = Renderer::new(Palette::default(), false);

        let mut out = Vec::new();
        renderer.draw(&grid, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "###\n#S#\n###\n");
    }
}
