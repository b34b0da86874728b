//! Framebuffer primitives
//!
//! Clear, OR-merge (optionally masked) and page-shifting blit over
//! page-organized byte buffers. A byte is one page column: eight vertically
//! stacked pixels, bit 0 topmost.
//!
//! Clear and merge have a word path that moves four bytes per step when the
//! length is a multiple of four. Both paths produce identical results.

use crate::config::PAGE_ROWS;

/// Bytes moved per step on the word path
const WORD: usize = core::mem::size_of::<u32>();

/// Buffer primitive errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// Zero-length buffer or zero-sized bitmap
    Empty,
    /// Source, mask and destination lengths differ
    LengthMismatch,
    /// Bitmap data shorter than `width * pages`
    SourceTooShort,
    /// Destination shorter than its declared geometry
    Geometry,
}

/// Whether a buffer of `len` bytes can take the word path
pub const fn word_aligned(len: usize) -> bool {
    len % WORD == 0
}

/// Glyph-bit masks for a bitmap shifted down by `n` rows (`n < 8`)
///
/// Returns `(upper, lower)`: the bits a shifted source byte occupies in the
/// page it starts in, and in the page below. `lower` is zero when `n == 0`.
pub const fn page_split_masks(n: u8) -> (u8, u8) {
    let n = n % PAGE_ROWS as u8;
    if n == 0 {
        (0xFF, 0x00)
    } else {
        (0xFF << n, 0xFF >> (8 - n))
    }
}

/// Zero a buffer
///
/// `fast` selects the word path. The caller decides whether the length
/// permits it; a trailing partial word is still cleared bytewise.
///
/// Returns the number of bytes cleared.
pub fn clear(buf: &mut [u8], fast: bool) -> Result<usize, BufferError> {
    if buf.is_empty() {
        return Err(BufferError::Empty);
    }

    if fast {
        let mut words = buf.chunks_exact_mut(WORD);
        for word in &mut words {
            word.copy_from_slice(&0u32.to_ne_bytes());
        }
        words.into_remainder().fill(0);
    } else {
        buf.fill(0);
    }

    Ok(buf.len())
}

/// Merge `from` into `to`: `to = (to & !mask) | from`
///
/// Without a mask this is a plain OR. All slices must have the same length.
///
/// Returns the number of bytes merged.
pub fn merge(from: &[u8], mask: Option<&[u8]>, to: &mut [u8]) -> Result<usize, BufferError> {
    let len = to.len();
    if len == 0 || from.is_empty() {
        return Err(BufferError::Empty);
    }
    if from.len() != len || mask.is_some_and(|m| m.len() != len) {
        return Err(BufferError::LengthMismatch);
    }

    if word_aligned(len) {
        merge_words(from, mask, to);
    } else {
        merge_bytes(from, mask, to);
    }

    Ok(len)
}

fn merge_bytes(from: &[u8], mask: Option<&[u8]>, to: &mut [u8]) {
    match mask {
        Some(mask) => {
            for ((dst, &src), &m) in to.iter_mut().zip(from).zip(mask) {
                *dst = (*dst & !m) | src;
            }
        }
        None => {
            for (dst, &src) in to.iter_mut().zip(from) {
                *dst |= src;
            }
        }
    }
}

fn merge_words(from: &[u8], mask: Option<&[u8]>, to: &mut [u8]) {
    let dst_words = to.chunks_exact_mut(WORD);
    let src_words = from.chunks_exact(WORD);
    match mask {
        Some(mask) => {
            for ((dst, src), m) in dst_words.zip(src_words).zip(mask.chunks_exact(WORD)) {
                let merged = (load(dst) & !load(m)) | load(src);
                dst.copy_from_slice(&merged.to_ne_bytes());
            }
        }
        None => {
            for (dst, src) in dst_words.zip(src_words) {
                let merged = load(dst) | load(src);
                dst.copy_from_slice(&merged.to_ne_bytes());
            }
        }
    }
}

#[inline]
fn load(bytes: &[u8]) -> u32 {
    u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// A page-organized source bitmap
///
/// `data` holds `pages` rows of `width` page columns, top page first.
#[derive(Debug, Clone, Copy)]
pub struct Bitmap<'a> {
    /// Page columns, row-major by page
    pub data: &'a [u8],
    /// Width in columns
    pub width: u16,
    /// Height in 8-row pages
    pub pages: u16,
}

impl<'a> Bitmap<'a> {
    /// Wrap page data of the given size
    pub const fn new(data: &'a [u8], width: u16, pages: u16) -> Self {
        Self { data, width, pages }
    }

    /// Number of bytes the declared size covers
    pub const fn len(&self) -> usize {
        self.width as usize * self.pages as usize
    }

    /// True when the declared size is zero
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Copy a bitmap into a page buffer at pixel offset `(at_x, at_y)`
///
/// `at_y` need not be page-aligned: with `n = at_y % 8` each source byte
/// lands shifted left by `n` in page `at_y / 8` and its top `n` bits spill
/// into the page below, when that page is still inside the destination.
/// With `overwrite` set the covered bits are cleared before OR-ing.
///
/// Columns that would fall at or past `dest_width` are clipped rather than
/// wrapping into the next page.
pub fn blit(
    src: Bitmap<'_>,
    overwrite: bool,
    at_x: u16,
    at_y: u16,
    dest: &mut [u8],
    dest_width: u16,
    dest_pages: u16,
) -> Result<(), BufferError> {
    if src.is_empty() {
        return Err(BufferError::Empty);
    }
    if src.data.len() < src.len() {
        return Err(BufferError::SourceTooShort);
    }

    let width = dest_width as usize;
    let dest_len = width * dest_pages as usize;
    if dest_len == 0 || dest.len() < dest_len {
        return Err(BufferError::Geometry);
    }

    let n = (at_y % PAGE_ROWS) as u8;
    let (upper_mask, lower_mask) = page_split_masks(n);
    let src_width = src.width as usize;

    let mut row_start = (at_y / PAGE_ROWS) as usize * width + at_x as usize;
    let mut col = 0usize;

    for &byte in &src.data[..src.len()] {
        if at_x as usize + col < width {
            let upper = row_start + col;
            if upper < dest_len {
                let bits = byte << n;
                dest[upper] = if overwrite {
                    (dest[upper] & !upper_mask) | bits
                } else {
                    dest[upper] | bits
                };
            }

            let lower = upper + width;
            if n > 0 && lower < dest_len {
                let bits = byte >> (8 - n);
                dest[lower] = if overwrite {
                    (dest[lower] & !lower_mask) | bits
                } else {
                    dest[lower] | bits
                };
            }
        }

        // Counting columns avoids a modulo per byte
        col += 1;
        if col == src_width {
            col = 0;
            row_start += width;
        }
    }

    Ok(())
}
