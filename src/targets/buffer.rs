use crate::types::Rgb8;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb8,
    pub depth_bits: u32,
}

impl Cell {
    pub fn new(ch: char, fg: Rgb8, depth: f32) -> Self {
        Self {
            ch,
            fg,
            depth_bits: depth.to_bits(),
        }
    }

    pub fn depth(self) -> f32 {
        f32::from_bits(self.depth_bits)
    }

    pub fn is_blank(self) -> bool {
        self.ch == ' '
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgb8::WHITE,
            depth_bits: f32::INFINITY.to_bits(),
        }
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("ch", &self.ch)
            .field("fg", &self.fg)
            .field("depth", &self.depth())
            .finish()
    }
}

/// Fixed-size character grid holding one rendered frame.
#[derive(Clone)]
pub struct BufferTarget {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl BufferTarget {
    pub fn new(width: usize, height: usize) -> Self {
        let len = width.saturating_mul(height);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[self.idx(x, y)])
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = self.idx(x, y);
        self.cells[idx] = cell;
        true
    }

    pub fn non_blank(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_blank()).count()
    }

    /// Plain text of the frame, one line per row, no color.
    pub fn to_text(&self) -> String {
        let mut s = String::with_capacity(self.cells.len() + self.height);
        for y in 0..self.height {
            if y > 0 {
                s.push('\n');
            }
            if let Some(row) = self.row(y) {
                s.extend(row.iter().map(|c| c.ch));
            }
        }
        s
    }

    pub fn hash64(&self) -> u64 {
        let mut h = 0xcbf2_9ce4_8422_2325_u64;
        h = fnv1a_u64(h, &(self.width as u64).to_le_bytes());
        h = fnv1a_u64(h, &(self.height as u64).to_le_bytes());

        for c in &self.cells {
            let ch = c.ch as u32;
            h = fnv1a_u64(h, &ch.to_le_bytes());
            h = fnv1a_u64(h, &c.fg.to_le_bytes());
            h = fnv1a_u64(h, &c.depth_bits.to_le_bytes());
        }

        h
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

fn fnv1a_u64(mut h: u64, bytes: &[u8]) -> u64 {
    let prime = 0x0100_0000_01b3_u64;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(prime);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::{BufferTarget, Cell};
    use crate::types::Rgb8;

    #[test]
    fn buffer_hash_tracks_content() {
        let mut a = BufferTarget::new(4, 3);
        let mut b = BufferTarget::new(4, 3);
        assert_eq!(a.hash64(), b.hash64());

        a.set(0, 0, Cell::new('@', Rgb8::new(1, 2, 3), 0.5));
        assert_ne!(a.hash64(), b.hash64());
        b.set(0, 0, Cell::new('@', Rgb8::new(1, 2, 3), 0.5));
        assert_eq!(a.hash64(), b.hash64());
        b.set(0, 0, Cell::new('@', Rgb8::new(1, 2, 4), 0.5));
        assert_ne!(a.hash64(), b.hash64());

        assert_ne!(BufferTarget::new(3, 4).hash64(), BufferTarget::new(4, 3).hash64());
    }

    #[test]
    fn out_of_bounds_set_returns_false() {
        let mut b = BufferTarget::new(2, 2);
        assert!(!b.set(2, 0, Cell::new('X', Rgb8::BLACK, 0.0)));
        assert!(!b.set(0, 2, Cell::new('X', Rgb8::BLACK, 0.0)));
        assert!(b.get(5, 5).is_none());
        assert!(b.row(2).is_none());
    }

    #[test]
    fn text_has_one_line_per_row() {
        let mut b = BufferTarget::new(3, 2);
        b.set(1, 0, Cell::new('#', Rgb8::WHITE, 0.1));
        b.set(2, 1, Cell::new('.', Rgb8::WHITE, 0.1));
        assert_eq!(b.to_text(), " # \n  .");
        assert_eq!(b.non_blank(), 2);
        b.clear(Cell::default());
        assert_eq!(b.non_blank(), 0);
    }
}
