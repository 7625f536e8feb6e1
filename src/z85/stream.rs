//! Writer-based Z85 encoding and decoding for the command line: line
//! wrapping on output, newline and garbage stripping on input.

use std::borrow::Cow;
use std::io::{self, BufWriter, Read, Write};

use super::core::{Z85Error, decode, encode_groups_into, encoded_len, is_z85_char};

/// Input bytes encoded per chunk: 4MB, a whole number of groups.
const ENCODE_CHUNK: usize = 4 * 1024 * 1024;

/// Wrap a codec error so it travels through `io::Result`.
fn invalid_data(err: Z85Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

/// Encode data and write to output, wrapping lines after `wrap_col`
/// characters (0 disables wrapping).
///
/// The length is checked before anything is written, so misaligned input
/// leaves `out` untouched.
pub fn encode_to_writer(data: &[u8], wrap_col: usize, out: &mut impl Write) -> io::Result<()> {
    let total = encoded_len(data.len()).map_err(invalid_data)?;
    if data.is_empty() {
        return Ok(());
    }

    let chunk_input = data.len().min(ENCODE_CHUNK);
    let mut encode_buf = Vec::with_capacity(chunk_input / 4 * 5);

    if wrap_col == 0 {
        for chunk in data.chunks(ENCODE_CHUNK) {
            encode_buf.clear();
            encode_groups_into(chunk, &mut encode_buf);
            out.write_all(&encode_buf)?;
        }
        return Ok(());
    }

    // Worst case per chunk: one newline per full line plus one for a line
    // carried over from the previous chunk.
    let chunk_encoded = total.min(ENCODE_CHUNK / 4 * 5);
    let mut wrap_buf = vec![0u8; chunk_encoded + chunk_encoded / wrap_col + 2];
    let mut col = 0usize;

    for chunk in data.chunks(ENCODE_CHUNK) {
        encode_buf.clear();
        encode_groups_into(chunk, &mut encode_buf);
        let wp = build_wrapped_output(&encode_buf, wrap_col, &mut col, &mut wrap_buf);
        out.write_all(&wrap_buf[..wp])?;
    }

    if col > 0 {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Copy `data` into `wrap_buf`, inserting a newline every `wrap_col` columns.
/// `col` carries the current column across calls. Returns bytes written.
#[inline]
fn build_wrapped_output(
    data: &[u8],
    wrap_col: usize,
    col: &mut usize,
    wrap_buf: &mut [u8],
) -> usize {
    let mut rp = 0;
    let mut wp = 0;

    while rp < data.len() {
        let space = wrap_col - *col;
        let avail = data.len() - rp;

        if avail < space {
            wrap_buf[wp..wp + avail].copy_from_slice(&data[rp..]);
            wp += avail;
            *col += avail;
            break;
        }

        wrap_buf[wp..wp + space].copy_from_slice(&data[rp..rp + space]);
        wp += space;
        wrap_buf[wp] = b'\n';
        wp += 1;
        rp += space;
        *col = 0;
    }

    wp
}

/// Decode Z85 data and write to output.
///
/// Line breaks and other ASCII whitespace are always dropped. With
/// `ignore_garbage`, every byte outside the alphabet is dropped as well.
/// Codec errors surface as `InvalidData` with the [`Z85Error`] as source;
/// nothing is written in that case.
pub fn decode_to_writer(
    data: &[u8],
    ignore_garbage: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }

    let clean = if ignore_garbage {
        Cow::Owned(strip_non_z85(data))
    } else {
        strip_whitespace(data)
    };

    let decoded = decode(&clean).map_err(invalid_data)?;
    out.write_all(&decoded)
}

/// Remove whitespace, borrowing the input when there is none.
fn strip_whitespace(data: &[u8]) -> Cow<'_, [u8]> {
    if memchr::memchr(b'\n', data).is_none() && !data.iter().any(|&b| is_whitespace(b)) {
        return Cow::Borrowed(data);
    }

    let mut clean = Vec::with_capacity(data.len());
    let mut last = 0;
    for pos in memchr::memchr_iter(b'\n', data) {
        clean.extend_from_slice(&data[last..pos]);
        last = pos + 1;
    }
    clean.extend_from_slice(&data[last..]);

    // CR, tab and friends are rare enough for a second pass.
    if clean.iter().any(|&b| is_whitespace(b)) {
        clean.retain(|&b| !is_whitespace(b));
    }
    Cow::Owned(clean)
}

/// Keep only Z85 alphabet bytes (for -i / --ignore-garbage).
fn strip_non_z85(data: &[u8]) -> Vec<u8> {
    data.iter().copied().filter(|&b| is_z85_char(b)).collect()
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Encode everything readable from `reader` into `writer`.
///
/// The whole input is buffered first: a misaligned tail must fail the call
/// before any output is produced.
pub fn encode_stream(
    reader: &mut impl Read,
    wrap_col: usize,
    writer: &mut impl Write,
) -> io::Result<()> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut out = BufWriter::with_capacity(2 * 1024 * 1024, writer);
    encode_to_writer(&data, wrap_col, &mut out)?;
    out.flush()
}

/// Decode everything readable from `reader` into `writer`.
pub fn decode_stream(
    reader: &mut impl Read,
    ignore_garbage: bool,
    writer: &mut impl Write,
) -> io::Result<()> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut out = BufWriter::with_capacity(2 * 1024 * 1024, writer);
    decode_to_writer(&data, ignore_garbage, &mut out)?;
    out.flush()
}
