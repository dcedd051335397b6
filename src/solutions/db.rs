// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The on-disk solutions-database format.
//!
//! A database starts with a 16-byte header: the magic bytes "GAINSOLS", a
//! format version byte and 7 bytes of padding. A little-endian u32 entry
//! count follows, then each entry in turn: its label, the four grid
//! dimensions (timesteps, channels, antennas, correlation products; the last
//! must be 4), the time and frequency grids as f64s, the antenna names, and
//! finally the gains as interleaved re/im f64 pairs in C order. Strings are
//! a u32 byte count followed by UTF-8 bytes.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use indexmap::IndexMap;
use log::trace;
use ndarray::prelude::*;

use super::{
    error::{SolutionsReadError, SolutionsWriteError},
    GainSolutions, SolutionDatabase, FORMAT_VERSION, MAGIC, NUM_CORRS,
};
use crate::c64;

pub(super) fn read<P: AsRef<Path>>(file: P) -> Result<SolutionDatabase, SolutionsReadError> {
    let file = file.as_ref();
    let f = File::open(file)?;
    let file_size = f.metadata()?.len();
    let mut bin_file = BufReader::new(f);

    let mut magic = [0; MAGIC.len()];
    bin_file.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(SolutionsReadError::BadMagic {
            file: file.to_path_buf(),
        });
    }
    let version = bin_file.read_u8()?;
    if version != FORMAT_VERSION {
        return Err(SolutionsReadError::BadVersion {
            file: file.to_path_buf(),
            expected: FORMAT_VERSION,
            got: version,
        });
    }
    let mut padding = [0; 7];
    bin_file.read_exact(&mut padding)?;

    let num_entries = bin_file.read_u32::<LittleEndian>()?;
    if num_entries == 0 {
        return Err(SolutionsReadError::NoEntries {
            file: file.to_path_buf(),
        });
    }

    let mut entries = IndexMap::with_capacity(num_entries as usize);
    for _ in 0..num_entries {
        let name = read_string(&mut bin_file)?;
        let num_times = bin_file.read_u32::<LittleEndian>()? as usize;
        let num_chans = bin_file.read_u32::<LittleEndian>()? as usize;
        let num_ants = bin_file.read_u32::<LittleEndian>()? as usize;
        let num_corrs = bin_file.read_u32::<LittleEndian>()? as usize;
        if num_corrs != NUM_CORRS {
            return Err(SolutionsReadError::BadCorrCount {
                name,
                expected: NUM_CORRS,
                got: num_corrs,
            });
        }
        trace!("entry '{name}': {num_times} timesteps, {num_chans} channels, {num_ants} antennas");

        // The dimensions are untrusted. Reject them before allocating
        // anything if their product overflows or if any grid claims more
        // bytes than the whole file holds.
        let num_floats = match gains_float_count(num_times, num_chans, num_ants, file_size) {
            Some(n) => n,
            None => {
                return Err(SolutionsReadError::BadShape {
                    file: file.to_path_buf(),
                    name,
                    num_times,
                    num_chans,
                    num_ants,
                });
            }
        };

        let mut times = vec![0.0; num_times];
        bin_file.read_f64_into::<LittleEndian>(&mut times)?;
        let mut freqs = vec![0.0; num_chans];
        bin_file.read_f64_into::<LittleEndian>(&mut freqs)?;

        let mut ant_names = Vec::with_capacity(num_ants);
        for _ in 0..num_ants {
            ant_names.push(read_string(&mut bin_file)?);
        }

        let mut floats = vec![0.0; num_floats];
        bin_file.read_f64_into::<LittleEndian>(&mut floats)?;
        let gains = Array4::from_shape_vec(
            (num_times, num_chans, num_ants, NUM_CORRS),
            floats
                .chunks_exact(2)
                .map(|pair| c64::new(pair[0], pair[1]))
                .collect(),
        )
        .expect("the shape matches the number of floats read");

        // Make a note of the antennas with no valid solutions at all.
        let flagged_ants = (0..num_ants)
            .filter(|&i| {
                gains
                    .slice(s![.., .., i, ..])
                    .iter()
                    .all(|g| g.re.is_nan() && g.im.is_nan())
            })
            .collect();

        let sols = GainSolutions {
            name: name.clone(),
            times: Array1::from_vec(times),
            freqs: Array1::from_vec(freqs),
            ant_names,
            flagged_ants,
            gains,
        };
        entries.insert(name, sols);
    }

    Ok(SolutionDatabase { entries })
}

pub(super) fn write<P: AsRef<Path>>(
    db: &SolutionDatabase,
    file: P,
) -> Result<(), SolutionsWriteError> {
    let mut bin_file = BufWriter::new(File::create(file)?);

    bin_file.write_all(MAGIC)?;
    bin_file.write_u8(FORMAT_VERSION)?;
    bin_file.write_all(&[0; 7])?;
    bin_file.write_u32::<LittleEndian>(db.entries.len() as u32)?;

    for (name, sols) in &db.entries {
        let (num_times, num_chans, num_ants, num_corrs) = sols.gains.dim();
        if num_corrs != NUM_CORRS {
            return Err(SolutionsWriteError::BadCorrCount {
                name: name.clone(),
                expected: NUM_CORRS,
                got: num_corrs,
            });
        }
        if sols.ant_names.len() != num_ants {
            return Err(SolutionsWriteError::MismatchedAntNames {
                name: name.clone(),
                num_ants,
                num_names: sols.ant_names.len(),
            });
        }

        write_string(&mut bin_file, name)?;
        for dim in [num_times, num_chans, num_ants, num_corrs] {
            bin_file.write_u32::<LittleEndian>(dim as u32)?;
        }
        for &time in &sols.times {
            bin_file.write_f64::<LittleEndian>(time)?;
        }
        for &freq in &sols.freqs {
            bin_file.write_f64::<LittleEndian>(freq)?;
        }
        for ant_name in &sols.ant_names {
            write_string(&mut bin_file, ant_name)?;
        }

        // One buffered write per antenna; 4 correlations of re/im f64 pairs.
        let mut buf = [0; 8 * 8];
        for gains_time in sols.gains.outer_iter() {
            for gains_chan in gains_time.outer_iter() {
                for g in gains_chan.outer_iter() {
                    LittleEndian::write_f64_into(
                        &[
                            g[0].re, g[0].im, g[1].re, g[1].im, g[2].re, g[2].im, g[3].re, g[3].im,
                        ],
                        &mut buf,
                    );
                    bin_file.write_all(&buf)?;
                }
            }
        }
    }

    bin_file.flush()?;
    Ok(())
}

/// The number of f64s in an entry's gains, or None if the dimensions are
/// nonsense. The header is untrusted: the gain count must not overflow, and
/// no axis may claim more bytes than the file itself holds (grid values take
/// 8 bytes each, antenna names at least 4).
fn gains_float_count(
    num_times: usize,
    num_chans: usize,
    num_ants: usize,
    file_size: u64,
) -> Option<usize> {
    let num_floats = (num_times as u64)
        .checked_mul(num_chans as u64)
        .and_then(|n| n.checked_mul(num_ants as u64))
        .and_then(|n| n.checked_mul((NUM_CORRS * 2) as u64))?;
    let byte_counts = [
        num_floats.checked_mul(8)?,
        num_times as u64 * 8,
        num_chans as u64 * 8,
        num_ants as u64 * 4,
    ];
    if byte_counts.into_iter().any(|bytes| bytes > file_size) {
        return None;
    }
    Some(num_floats as usize)
}

fn read_string<R: Read>(r: &mut R) -> Result<String, SolutionsReadError> {
    let len = r.read_u32::<LittleEndian>()? as usize;
    let mut buf = vec![0; len];
    r.read_exact(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_string<W: Write>(w: &mut W, s: &str) -> Result<(), std::io::Error> {
    w.write_u32::<LittleEndian>(s.len() as u32)?;
    w.write_all(s.as_bytes())
}
