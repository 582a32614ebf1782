use std::{
    ffi::OsString,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::debug;

use crate::{EncodeError, Header, PixelSource, Rgb565, source};

pub(crate) const OP_INDEX: u8 = 0b00_000000;
pub(crate) const OP_DIFF: u8 = 0b01_000000;
pub(crate) const OP_LUMA: u8 = 0b10_000000;
pub(crate) const OP_RUN: u8 = 0b11_000000;
pub(crate) const OP_RGB: u8 = 0b11111110;

pub(crate) const MAX_RUN: u8 = 62;

/// Appended to the source path to name the encoded file.
pub const OUTPUT_SUFFIX: &str = ".qoi";

/// Number of groups each operator produced during one encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpCounts {
    pub index: usize,
    pub diff: usize,
    pub luma: usize,
    pub rgb: usize,
    /// RUN bytes, not pixels covered by them.
    pub run: usize,
}

/// Encodes the whole image into `output`, visiting pixels in row-major
/// order.
pub fn encode(source: &impl PixelSource, output: &mut impl Write) -> io::Result<OpCounts> {
    let header = Header::new(source.width(), source.height());
    debug!("encoding {}x{} image", header.width, header.height);
    let mut encoder = EncoderState::new(header, output);
    encoder.encode_header()?;
    for y in 0..header.height {
        for x in 0..header.width {
            encoder.encode_pixel(Rgb565::from_sample(source.sample(x, y)))?;
        }
    }
    encoder.finish()
}

/// Convenience function that calls `encode`.
pub fn encode_to_vec(source: &impl PixelSource) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    encode(source, &mut data)?;
    Ok(data)
}

/// Decodes the image at `path` and encodes it into memory.
pub fn encode_from_file(path: impl AsRef<Path>) -> Result<Vec<u8>, EncodeError> {
    let image = source::open(path)?;
    Ok(encode_to_vec(&image)?)
}

/// Encodes the image at `path` and writes the result next to it, returning
/// the path written. Nothing is written if decoding fails.
pub fn encode_file(path: impl AsRef<Path>) -> Result<PathBuf, EncodeError> {
    let path = path.as_ref();
    let data = encode_from_file(path)?;
    let output = output_path(path);
    save_data(&output, &data)?;
    Ok(output)
}

/// `photo.png` becomes `photo.png.qoi`.
pub fn output_path(path: impl AsRef<Path>) -> PathBuf {
    let mut name = OsString::from(path.as_ref().as_os_str());
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

fn save_data(path: impl AsRef<Path>, data: &[u8]) -> io::Result<()> {
    let file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(data)?;
    writer.flush()
}

#[derive(Debug)]
pub(crate) struct EncoderState<W: Write> {
    pub(crate) header: Header,
    pub(crate) index_array: [u16; 64],
    /// `None` until the first pixel, so the first pixel never starts a run.
    pub(crate) previous_value: Option<u16>,
    /// Starts at `[-1, -1, -1]`; the first pixel is diffed against it.
    pub(crate) previous_pixel: [i16; 3],
    pub(crate) run: u8,
    pub(crate) counts: OpCounts,
    pub(crate) output: W,
}

impl<W: Write> EncoderState<W> {
    pub(crate) fn new(header: Header, output: W) -> Self {
        Self {
            header,
            index_array: [0; 64],
            previous_value: None,
            previous_pixel: [-1; 3],
            run: 0,
            counts: OpCounts::default(),
            output,
        }
    }

    pub(crate) fn encode_header(&mut self) -> io::Result<()> {
        self.output.write_all(&self.header.to_bytes())
    }

    pub(crate) fn encode_pixel(&mut self, pixel: Rgb565) -> io::Result<()> {
        let value = pixel.packed();
        if self.previous_value == Some(value) {
            self.run += 1;
            if self.run == MAX_RUN {
                self.flush_run()?;
            }
        } else {
            self.flush_run()?;
            if let Some(byte) = self.try_encode_with_op_index(pixel) {
                self.counts.index += 1;
                self.output.write_all(&[byte])?;
            } else if let Some(byte) = self.try_encode_with_op_diff(pixel) {
                self.counts.diff += 1;
                self.output.write_all(&[byte])?;
            } else if let Some(bytes) = self.try_encode_with_op_luma(pixel) {
                self.counts.luma += 1;
                self.output.write_all(&bytes)?;
            } else {
                self.counts.rgb += 1;
                let bytes = self.encode_with_op_rgb(pixel);
                self.output.write_all(&bytes)?;
            }
        }
        self.previous_value = Some(value);
        self.previous_pixel = pixel.signed();
        Ok(())
    }

    pub(crate) fn flush_run(&mut self) -> io::Result<()> {
        if self.run == 0 {
            return Ok(());
        }
        // run is in 1..=62, stored with a bias of -1.
        let byte = OP_RUN | (self.run - 1);
        self.run = 0;
        self.counts.run += 1;
        self.output.write_all(&[byte])
    }

    /// Looks the pixel up in the index. On a miss the slot is overwritten
    /// with the pixel, whatever it held before.
    pub(crate) fn try_encode_with_op_index(&mut self, pixel: Rgb565) -> Option<u8> {
        let index = pixel.hash();
        let value = pixel.packed();
        if self.index_array[index] == value {
            // index < 64, therefore the first 2 bits are always `00`.
            Some(OP_INDEX | index as u8)
        } else {
            self.index_array[index] = value;
            None
        }
    }

    fn deltas(&self, pixel: Rgb565) -> [i16; 3] {
        let [r, g, b] = pixel.signed();
        let [pr, pg, pb] = self.previous_pixel;
        [r - pr, g - pg, b - pb]
    }

    pub(crate) fn try_encode_with_op_diff(&self, pixel: Rgb565) -> Option<u8> {
        let [dr, dg, db] = self.deltas(pixel);
        if ![dr, dg, db].iter().all(|d| (-2..=1).contains(d)) {
            return None;
        }
        let [dr, dg, db] = [dr, dg, db].map(|d| (d + 2) as u8);
        Some(OP_DIFF | (dr << 4) | (dg << 2) | db)
    }

    pub(crate) fn try_encode_with_op_luma(&self, pixel: Rgb565) -> Option<[u8; 2]> {
        let [dr, dg, db] = self.deltas(pixel);
        let dr_dg = dr - dg;
        let db_dg = db - dg;
        let in_range =
            (-32..=31).contains(&dg) && (-8..=7).contains(&dr_dg) && (-8..=7).contains(&db_dg);
        if !in_range {
            return None;
        }
        let byte0 = OP_LUMA | (dg + 32) as u8;
        let byte1 = (((dr_dg + 8) as u8) << 4) | (db_dg + 8) as u8;
        Some([byte0, byte1])
    }

    /// This OP would never fail.
    pub(crate) fn encode_with_op_rgb(&self, pixel: Rgb565) -> [u8; 3] {
        let [hi, lo] = pixel.to_raw_bytes();
        [OP_RGB, hi, lo]
    }

    /// Closes a run left open by the last pixel. No end marker follows.
    pub(crate) fn finish(mut self) -> io::Result<OpCounts> {
        self.flush_run()?;
        self.output.flush()?;
        debug!("operator counts: {:?}", self.counts);
        Ok(self.counts)
    }
}
