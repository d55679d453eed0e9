pub(crate) const BACKGROUND: char = ' ';

/// Fixed-size character grid, (0,0) top-left, row-major.
pub(crate) struct FrameBuffer {
    pub(crate) w: usize,
    pub(crate) h: usize,
    cells: Vec<char>,
}

impl FrameBuffer {
    pub(crate) fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            cells: vec![BACKGROUND; w * h],
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(BACKGROUND);
    }

    #[allow(dead_code)]
    pub(crate) fn cell(&self, x: usize, y: usize) -> Option<char> {
        if x < self.w && y < self.h {
            Some(self.cells[y * self.w + x])
        } else {
            None
        }
    }

    /// Write `symbol` at (x, y). Both axes must be on the grid; anything else is
    /// dropped silently.
    pub(crate) fn plot(&mut self, x: i32, y: i32, symbol: char) {
        let x_ok = x >= 0 && (x as usize) < self.w;
        let y_ok = y >= 0 && (y as usize) < self.h;
        if !(x_ok && y_ok) {
            return;
        }
        let i = y as usize * self.w + x as usize;
        self.cells[i] = symbol;
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.w.max(1))
    }
}
