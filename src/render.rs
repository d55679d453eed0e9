use crate::config::Settings;
use crate::frame::FrameBuffer;
use crate::pendulum::{PendulumState, Vec2};
use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

pub(crate) const HOOK_GLYPH: char = 'x';
pub(crate) const BOB_GLYPH: char = 'o';

pub(crate) struct Renderer {
    x_scale: f32,
    line: String,
}

impl Renderer {
    pub(crate) fn new(settings: &Settings) -> Self {
        Self {
            x_scale: settings.x_scale,
            line: String::with_capacity(settings.width),
        }
    }

    /// World to cell coordinates: stretch x for the cell aspect, truncate toward zero.
    pub(crate) fn to_screen(&self, p: Vec2) -> (i32, i32) {
        ((self.x_scale * p.x) as i32, p.y as i32)
    }

    /// Draw `state` into `buf` and write the frame to `out`.
    pub(crate) fn render<W: Write>(
        &mut self,
        state: &PendulumState,
        buf: &mut FrameBuffer,
        out: &mut W,
    ) -> io::Result<()> {
        buf.clear();

        let (hx, hy) = self.to_screen(state.params.hook);
        let (x1, y1) = self.to_screen(state.bob1);
        let (x2, y2) = self.to_screen(state.bob2);
        buf.plot(hx, hy, HOOK_GLYPH);
        buf.plot(x1, y1, BOB_GLYPH);
        buf.plot(x2, y2, BOB_GLYPH);

        // clear, then home the cursor so frames overwrite in place instead of scrolling
        queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        for row in buf.rows() {
            self.line.clear();
            self.line.extend(row.iter());
            self.line.push('\n');
            queue!(out, Print(&self.line))?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::advance;
    use crate::pendulum::create_initial_state;

    const PREFIX: &str = "\x1b[2J\x1b[1;1H";

    fn render_to_string(state: &PendulumState, settings: &Settings) -> String {
        let mut renderer = Renderer::new(settings);
        let mut buf = FrameBuffer::new(settings.width, settings.height);
        let mut out = Vec::new();
        renderer.render(state, &mut buf, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn frame_is_clear_then_exact_grid() {
        let settings = Settings::default();
        let mut state = create_initial_state(&settings);
        for _ in 0..50 {
            let text = render_to_string(&state, &settings);
            let body = text.strip_prefix(PREFIX).expect("frame starts with clear + home");
            let rows: Vec<&str> = body.split_terminator('\n').collect();
            assert_eq!(rows.len(), 20);
            assert!(rows.iter().all(|r| r.chars().count() == 80));
            assert!(body.ends_with('\n'));
            for _ in 0..100 {
                state = advance(state, 0.001);
            }
        }
    }

    #[test]
    fn initial_frame_places_hook_and_bobs() {
        let settings = Settings::default();
        let state = create_initial_state(&settings);
        let text = render_to_string(&state, &settings);
        let rows: Vec<Vec<char>> = text
            .strip_prefix(PREFIX)
            .unwrap()
            .lines()
            .map(|l| l.chars().collect())
            .collect();

        // hook (20, 6) -> column 40, row 6
        assert_eq!(rows[6][40], HOOK_GLYPH);
        // bob1 (25.66, 0.34) -> column 51, row 0
        assert_eq!(rows[0][51], BOB_GLYPH);
        // bob2 (31.66, 0.34) -> column 63, row 0
        assert_eq!(rows[0][63], BOB_GLYPH);

        let marks: usize = rows.iter().flatten().filter(|&&c| c != ' ').count();
        assert_eq!(marks, 3);
    }

    #[test]
    fn off_grid_bobs_are_dropped() {
        let settings = Settings::default();
        let mut state = create_initial_state(&settings);
        // straight up: both bobs above row 0
        state.angle1 = std::f32::consts::PI;
        state.angle2 = std::f32::consts::PI;
        state.refresh_positions();
        let text = render_to_string(&state, &settings);
        let marks: Vec<char> = text
            .strip_prefix(PREFIX)
            .unwrap()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        assert_eq!(marks, vec![HOOK_GLYPH]);
    }

    #[test]
    fn screen_x_is_stretched_and_truncated() {
        let r = Renderer::new(&Settings::default());
        assert_eq!(r.to_screen(Vec2::new(20.0, 6.0)), (40, 6));
        assert_eq!(r.to_screen(Vec2::new(10.3, 4.9)), (20, 4));
        // truncation, not floor
        assert_eq!(r.to_screen(Vec2::new(-0.4, -0.7)), (0, 0));
    }
}
