//! Map file loading.

use byteorder::{BigEndian as BE, ReadBytesExt};
use log::{debug, warn};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, Read},
    mem::size_of,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// NASADEM/SRTM marker for a missing sample.
const HGT_VOID: i16 = i16::MIN;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid HGT file len {0} for {1}")]
    HgtLen(u64, PathBuf),

    #[error("no map width given for {0}")]
    Width(PathBuf),
}

/// Cells and row width, ready to hand to a `View`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    pub cells: Vec<Option<f64>>,
    pub width: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonMap {
    Flat {
        width: Option<usize>,
        cells: Vec<Option<f64>>,
    },
    Rows(Vec<Vec<Option<f64>>>),
}

/// Loads the map at `path`, picking the format from its extension.
///
/// `width` overrides the row width of a flat JSON map.
pub fn load<P: AsRef<Path>>(path: P, width: Option<usize>) -> Result<MapData, InputError> {
    let path = path.as_ref();
    let is_hgt = path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("hgt"));
    let file = File::open(path)?;
    let map = if is_hgt {
        let len = file.metadata()?.len();
        read_hgt(BufReader::new(file), len, path)?
    } else {
        read_json(BufReader::new(file), width, path)?
    };
    debug!(
        "load; path: {path:?}, cells: {}, width: {}",
        map.cells.len(),
        map.width
    );
    Ok(map)
}

fn read_json<R: Read>(rdr: R, width: Option<usize>, path: &Path) -> Result<MapData, InputError> {
    match serde_json::from_reader(rdr)? {
        JsonMap::Flat {
            width: file_width,
            cells,
        } => {
            let width = width
                .or(file_width)
                .ok_or_else(|| InputError::Width(path.to_owned()))?;
            Ok(MapData { cells, width })
        }
        JsonMap::Rows(rows) => {
            if width.is_some() {
                warn!("ignoring width override for row-form map {path:?}");
            }
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            let cells = rows
                .into_iter()
                .flat_map(|mut row| {
                    row.resize(width, None);
                    row
                })
                .collect();
            Ok(MapData { cells, width })
        }
    }
}

/// Reads a big-endian `.hgt` tile of `len` bytes.
fn read_hgt<R: Read>(mut rdr: R, len: u64, path: &Path) -> Result<MapData, InputError> {
    const RES_1_ARCSECONDS_FILE_LEN: u64 = 3601 * 3601 * size_of::<i16>() as u64;
    const RES_3_ARCSECONDS_FILE_LEN: u64 = 1201 * 1201 * size_of::<i16>() as u64;
    let side = match len {
        RES_1_ARCSECONDS_FILE_LEN => 3601,
        RES_3_ARCSECONDS_FILE_LEN => 1201,
        invalid_len => return Err(InputError::HgtLen(invalid_len, path.to_owned())),
    };

    let mut cells = Vec::with_capacity(side * side);
    for _ in 0..(side * side) {
        let sample = rdr.read_i16::<BE>()?;
        cells.push((sample != HGT_VOID).then_some(f64::from(sample)));
    }
    Ok(MapData { cells, width: side })
}

#[cfg(test)]
mod tests {
    use super::{read_hgt, read_json, InputError, MapData, HGT_VOID};
    use std::path::Path;

    fn json(text: &str, width: Option<usize>) -> Result<MapData, InputError> {
        read_json(text.as_bytes(), width, Path::new("test.json"))
    }

    #[test]
    fn test_flat_json() {
        let map = json(r#"{"width": 3, "cells": [1, 2.5, null, 4]}"#, None).unwrap();
        assert_eq!(map.width, 3);
        assert_eq!(map.cells, [Some(1.0), Some(2.5), None, Some(4.0)]);
        assert_eq!(json(r#"{"width": 3, "cells": []}"#, Some(5)).unwrap().width, 5);
        assert_eq!(json(r#"{"cells": [1, 2]}"#, Some(2)).unwrap().width, 2);
        assert!(matches!(
            json(r#"{"cells": [1, 2]}"#, None),
            Err(InputError::Width(_))
        ));
    }

    #[test]
    fn test_row_json() {
        let map = json("[[0, 5, 5], [5, null], [4, 4, 3]]", None).unwrap();
        assert_eq!(map.width, 3);
        assert_eq!(
            map.cells,
            [
                Some(0.0),
                Some(5.0),
                Some(5.0),
                Some(5.0),
                None,
                None,
                Some(4.0),
                Some(4.0),
                Some(3.0)
            ]
        );
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(json("{\"width\": 2", None), Err(InputError::Json(_))));
        assert!(matches!(json("[[\"a\"]]", None), Err(InputError::Json(_))));
    }

    #[test]
    fn test_hgt() {
        let side = 1201;
        let mut raw = vec![0_u8; side * side * 2];
        raw[0..2].copy_from_slice(&1234_i16.to_be_bytes());
        raw[2..4].copy_from_slice(&HGT_VOID.to_be_bytes());
        let last = raw.len() - 2;
        raw[last..].copy_from_slice(&(-12_i16).to_be_bytes());

        let len = raw.len() as u64;
        let map = read_hgt(raw.as_slice(), len, Path::new("N44W072.hgt")).unwrap();
        assert_eq!(map.width, side);
        assert_eq!(map.cells.len(), side * side);
        assert_eq!(map.cells[0], Some(1234.0));
        assert_eq!(map.cells[1], None);
        assert_eq!(map.cells[2], Some(0.0));
        assert_eq!(map.cells.last(), Some(&Some(-12.0)));
    }

    #[test]
    fn test_hgt_len() {
        assert!(matches!(
            read_hgt(&[0_u8; 8][..], 8, Path::new("N44W072.hgt")),
            Err(InputError::HgtLen(8, _))
        ));
        // Advertised length longer than the data.
        assert!(matches!(
            read_hgt(&[0_u8; 8][..], 1201 * 1201 * 2, Path::new("N44W072.hgt")),
            Err(InputError::Io(_))
        ));
    }
}
