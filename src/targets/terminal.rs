use crate::{
    targets::{
        buffer::{BufferTarget, Cell},
        PresentMode,
    },
    types::{ColorMode, Rgb8},
};
use crossterm::{
    cursor,
    style::{self, Color},
    terminal,
};
use std::io::{self, Write};

/// Raw mode, alternate screen and hidden cursor for as long as the guard lives.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(err) = crossterm::execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        ) {
            let _ = crossterm::execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        log::debug!("terminal guard engaged");
        Ok(Self { active: true })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        let _ = crossterm::execute!(
            io::stdout(),
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        self.active = false;
        log::debug!("terminal restored");
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalPresenterConfig {
    pub color_mode: ColorMode,
    pub present_mode: PresentMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResolvedMode {
    Truecolor,
    Ansi256,
    Ansi16,
    Mono,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct PrevCell {
    ch: char,
    fg: u32,
}

impl PrevCell {
    fn empty() -> Self {
        Self { ch: '\0', fg: 0 }
    }
}

pub struct TerminalPresenter {
    width: usize,
    height: usize,
    prev: Vec<PrevCell>,
    first: bool,
    config: TerminalPresenterConfig,
    prev_mode: ResolvedMode,
    cur_style: Option<u32>,
}

impl TerminalPresenter {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_config(width, height, TerminalPresenterConfig::default())
    }

    pub fn with_config(width: usize, height: usize, config: TerminalPresenterConfig) -> Self {
        Self {
            width,
            height,
            prev: vec![PrevCell::empty(); width.saturating_mul(height)],
            first: true,
            config,
            prev_mode: ResolvedMode::Mono,
            cur_style: None,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.prev.clear();
        self.prev
            .resize(width.saturating_mul(height), PrevCell::empty());
        self.first = true;
        self.cur_style = None;
    }

    pub fn reset(&mut self) {
        self.prev.fill(PrevCell::empty());
        self.first = true;
        self.cur_style = None;
    }

    pub fn present<W: Write>(&mut self, out: &mut W, buf: &BufferTarget) -> io::Result<()> {
        if buf.width() != self.width || buf.height() != self.height {
            self.resize(buf.width(), buf.height());
        }

        let mode = resolve_mode(self.config.color_mode);
        if mode != self.prev_mode {
            self.reset();
            self.prev_mode = mode;
        }

        match self.config.present_mode {
            PresentMode::Full => self.present_full(out, buf, mode)?,
            PresentMode::Diff => self.present_diff(out, buf, mode)?,
        }

        out.flush()
    }

    /// Writes `text` on row `y` with default colors, erasing the rest of the line.
    pub fn write_line<W: Write>(&mut self, out: &mut W, y: usize, text: &str) -> io::Result<()> {
        crossterm::queue!(
            out,
            cursor::MoveTo(0, to_u16(y)),
            style::ResetColor,
            style::Print(text),
            terminal::Clear(terminal::ClearType::UntilNewLine)
        )?;
        self.cur_style = None;
        out.flush()
    }

    fn present_full<W: Write>(
        &mut self,
        out: &mut W,
        buf: &BufferTarget,
        mode: ResolvedMode,
    ) -> io::Result<()> {
        crossterm::queue!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        self.cur_style = None;

        for y in 0..self.height {
            let Some(row) = buf.row(y) else {
                break;
            };
            crossterm::queue!(out, cursor::MoveTo(0, to_u16(y)))?;
            let mut x = 0;
            while x < row.len() {
                let fg_key = make_prev_cell(&row[x], mode).fg;
                let mut s = String::new();
                while x < row.len() {
                    let key = make_prev_cell(&row[x], mode);
                    if key.fg != fg_key {
                        break;
                    }
                    self.prev[y * self.width + x] = key;
                    s.push(key.ch);
                    x += 1;
                }
                self.apply_style(out, mode, fg_key)?;
                crossterm::queue!(out, style::Print(&s))?;
            }
        }

        if mode != ResolvedMode::Mono {
            crossterm::queue!(out, style::ResetColor)?;
        }
        self.cur_style = None;
        self.first = false;
        Ok(())
    }

    fn present_diff<W: Write>(
        &mut self,
        out: &mut W,
        buf: &BufferTarget,
        mode: ResolvedMode,
    ) -> io::Result<()> {
        if self.first {
            crossterm::queue!(
                out,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0),
                style::ResetColor
            )?;
            self.prev.fill(PrevCell::empty());
            self.cur_style = None;
            self.first = false;
        }

        let cells = buf.as_slice();
        let width = self.width;

        for y in 0..self.height {
            let row_start = y * width;
            let mut x = 0;
            while x < width {
                let idx = row_start + x;
                let key = make_prev_cell(&cells[idx], mode);
                if key == self.prev[idx] {
                    x += 1;
                    continue;
                }

                let run_start = x;
                let fg_key = key.fg;

                let mut s = String::new();
                while x < width {
                    let idx2 = row_start + x;
                    let key2 = make_prev_cell(&cells[idx2], mode);
                    if key2 == self.prev[idx2] || key2.fg != fg_key {
                        break;
                    }
                    self.prev[idx2] = key2;
                    s.push(key2.ch);
                    x += 1;
                }

                crossterm::queue!(out, cursor::MoveTo(to_u16(run_start), to_u16(y)))?;
                self.apply_style(out, mode, fg_key)?;
                crossterm::queue!(out, style::Print(&s))?;
            }
        }
        Ok(())
    }

    fn apply_style<W: Write>(
        &mut self,
        out: &mut W,
        mode: ResolvedMode,
        fg_key: u32,
    ) -> io::Result<()> {
        if mode == ResolvedMode::Mono || self.cur_style == Some(fg_key) {
            return Ok(());
        }
        let color = match mode {
            ResolvedMode::Truecolor => {
                let fg = unpack_rgb(fg_key);
                Color::Rgb {
                    r: fg.r,
                    g: fg.g,
                    b: fg.b,
                }
            }
            ResolvedMode::Ansi256 => Color::AnsiValue(u8::try_from(fg_key).unwrap_or(0)),
            ResolvedMode::Ansi16 => ansi16_color(u8::try_from(fg_key).unwrap_or(7)),
            ResolvedMode::Mono => return Ok(()),
        };
        crossterm::queue!(out, style::SetForegroundColor(color))?;
        self.cur_style = Some(fg_key);
        Ok(())
    }
}

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

fn resolve_mode(mode: ColorMode) -> ResolvedMode {
    match mode {
        ColorMode::Truecolor => ResolvedMode::Truecolor,
        ColorMode::Ansi256 => ResolvedMode::Ansi256,
        ColorMode::Ansi16 => ResolvedMode::Ansi16,
        ColorMode::Mono => ResolvedMode::Mono,
        ColorMode::Auto => detect_mode(),
    }
}

fn detect_mode() -> ResolvedMode {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ResolvedMode::Truecolor;
    }
    let term = std::env::var("TERM").unwrap_or_default().to_lowercase();
    if term.contains("256color") {
        return ResolvedMode::Ansi256;
    }
    if term.is_empty() || term == "dumb" {
        return ResolvedMode::Mono;
    }
    ResolvedMode::Ansi16
}

fn make_prev_cell(cell: &Cell, mode: ResolvedMode) -> PrevCell {
    let fg = match mode {
        ResolvedMode::Mono => 0,
        ResolvedMode::Truecolor => pack_rgb(cell.fg),
        ResolvedMode::Ansi256 => u32::from(quantize_ansi256(cell.fg)),
        ResolvedMode::Ansi16 => u32::from(quantize_ansi16(cell.fg)),
    };
    PrevCell { ch: cell.ch, fg }
}

fn pack_rgb(c: Rgb8) -> u32 {
    (u32::from(c.r) << 16) | (u32::from(c.g) << 8) | u32::from(c.b)
}

fn unpack_rgb(v: u32) -> Rgb8 {
    Rgb8::new(
        ((v >> 16) & 255) as u8,
        ((v >> 8) & 255) as u8,
        (v & 255) as u8,
    )
}

fn ansi16_color(idx: u8) -> Color {
    match idx {
        0 => Color::Black,
        1 => Color::DarkRed,
        2 => Color::DarkGreen,
        3 => Color::DarkYellow,
        4 => Color::DarkBlue,
        5 => Color::DarkMagenta,
        6 => Color::DarkCyan,
        7 => Color::Grey,
        8 => Color::DarkGrey,
        9 => Color::Red,
        10 => Color::Green,
        11 => Color::Yellow,
        12 => Color::Blue,
        13 => Color::Magenta,
        14 => Color::Cyan,
        _ => Color::White,
    }
}

fn quantize_ansi16(c: Rgb8) -> u8 {
    (0u8..16)
        .min_by_key(|&i| {
            let p = ansi16_to_rgb(i);
            dist2_rgb(c.r, c.g, c.b, p.r, p.g, p.b)
        })
        .unwrap_or(7)
}

fn quantize_ansi256(c: Rgb8) -> u8 {
    let (r, g, b) = (c.r, c.g, c.b);

    let gray = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
    let gray_idx = gray_to_ansi256(gray);
    let gray_rgb = ansi256_to_rgb(gray_idx);

    let cube_idx = rgb_to_ansi256_cube(r, g, b);
    let cube_rgb = ansi256_to_rgb(cube_idx);

    let dg = dist2_rgb(r, g, b, gray_rgb.r, gray_rgb.g, gray_rgb.b);
    let dc = dist2_rgb(r, g, b, cube_rgb.r, cube_rgb.g, cube_rgb.b);

    if dg <= dc {
        gray_idx
    } else {
        cube_idx
    }
}

fn dist2_rgb(r0: u8, g0: u8, b0: u8, r1: u8, g1: u8, b1: u8) -> u32 {
    let dr = i32::from(r0) - i32::from(r1);
    let dg = i32::from(g0) - i32::from(g1);
    let db = i32::from(b0) - i32::from(b1);
    (dr * dr + dg * dg + db * db) as u32
}

fn rgb_to_ansi256_cube(r: u8, g: u8, b: u8) -> u8 {
    let ir = rgb_to_ansi6(r);
    let ig = rgb_to_ansi6(g);
    let ib = rgb_to_ansi6(b);
    (16u16 + 36u16 * u16::from(ir) + 6u16 * u16::from(ig) + u16::from(ib)) as u8
}

fn rgb_to_ansi6(v: u8) -> u8 {
    ((u16::from(v) * 5 + 127) / 255) as u8
}

fn gray_to_ansi256(gray: u8) -> u8 {
    if gray < 8 {
        return 16;
    }
    if gray > 248 {
        return 231;
    }
    (232u16 + ((u16::from(gray) - 8) / 10)) as u8
}

fn ansi256_to_rgb(idx: u8) -> Rgb8 {
    if idx < 16 {
        return ansi16_to_rgb(idx);
    }
    if idx >= 232 {
        let v = (8u16 + u16::from(idx - 232) * 10) as u8;
        return Rgb8::new(v, v, v);
    }
    let i = idx - 16;
    let r = i / 36;
    let g = (i % 36) / 6;
    let b = i % 6;
    Rgb8::new(ansi6_to_rgb(r), ansi6_to_rgb(g), ansi6_to_rgb(b))
}

fn ansi6_to_rgb(i: u8) -> u8 {
    match i {
        0 => 0,
        1 => 95,
        2 => 135,
        3 => 175,
        4 => 215,
        _ => 255,
    }
}

fn ansi16_to_rgb(idx: u8) -> Rgb8 {
    match idx {
        0 => Rgb8::new(0, 0, 0),
        1 => Rgb8::new(128, 0, 0),
        2 => Rgb8::new(0, 128, 0),
        3 => Rgb8::new(128, 128, 0),
        4 => Rgb8::new(0, 0, 128),
        5 => Rgb8::new(128, 0, 128),
        6 => Rgb8::new(0, 128, 128),
        7 => Rgb8::new(192, 192, 192),
        8 => Rgb8::new(128, 128, 128),
        9 => Rgb8::new(255, 0, 0),
        10 => Rgb8::new(0, 255, 0),
        11 => Rgb8::new(255, 255, 0),
        12 => Rgb8::new(0, 0, 255),
        13 => Rgb8::new(255, 0, 255),
        14 => Rgb8::new(0, 255, 255),
        _ => Rgb8::new(255, 255, 255),
    }
}
