//! ESRI shapefile writer for point exports
//!
//! Writes the `.shp` geometry, `.shx` index and `.dbf` attribute table plus
//! the `.prj` and `.cpg` sidecars. Integers in the main file headers are
//! big-endian while coordinates and shape types are little-endian, as the
//! format requires.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use chrono::{Datelike, NaiveDate, Utc};
use log::info;

use crate::coordinate::{catalog, Point};
use crate::dataset::ExportBatch;
use crate::errors::CoordResult;
use crate::utils::progress::ProgressTracker;

/// Shapefile magic number
const FILE_CODE: i32 = 9994;
const VERSION: i32 = 1000;
const SHAPE_TYPE_POINT: i32 = 1;
/// Main file header size in bytes
const HEADER_SIZE: usize = 100;
/// Point record content: shape type plus two doubles
const POINT_CONTENT_SIZE: usize = 20;
/// Record header: record number plus content length
const RECORD_HEADER_SIZE: usize = 8;

/// Width of the numeric FID attribute
const FID_WIDTH: u8 = 10;

/// Paths of the files making up a written shapefile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapefileFiles {
    pub shp: PathBuf,
    pub shx: PathBuf,
    pub dbf: PathBuf,
    pub prj: PathBuf,
    pub cpg: PathBuf,
}

impl ShapefileFiles {
    fn new(directory: &Path, base_name: &str) -> Self {
        let path = |ext: &str| directory.join(format!("{}.{}", base_name, ext));
        ShapefileFiles {
            shp: path("shp"),
            shx: path("shx"),
            dbf: path("dbf"),
            prj: path("prj"),
            cpg: path("cpg"),
        }
    }

    /// All paths, main file first
    pub fn all(&self) -> Vec<&PathBuf> {
        vec![&self.shp, &self.shx, &self.dbf, &self.prj, &self.cpg]
    }
}

/// Writes point batches as shapefiles
pub struct ShapefileWriter;

impl ShapefileWriter {
    /// Write `batch` as `<directory>/<base_name>.*`
    pub fn write(batch: &ExportBatch, directory: &Path, base_name: &str) -> CoordResult<ShapefileFiles> {
        let definition = catalog::lookup(batch.reference)?;
        let files = ShapefileFiles::new(directory, base_name);
        fs::create_dir_all(directory)?;

        let progress = ProgressTracker::new(batch.points.len() as u64, "Writing shapefile");
        let shp = Self::encode_shp(&batch.points, &progress)?;
        progress.finish("Shapefile written");

        fs::write(&files.shp, shp)?;
        fs::write(&files.shx, Self::encode_shx(&batch.points)?)?;
        fs::write(&files.dbf, Self::encode_dbf(batch.points.len(), Utc::now().date_naive())?)?;
        fs::write(&files.prj, definition.to_wkt())?;
        fs::write(&files.cpg, "UTF-8")?;

        info!("Wrote {} points in {} to {}", batch.points.len(), batch.reference, files.shp.display());
        Ok(files)
    }

    /// Main file header shared by `.shp` and `.shx`
    fn write_header(out: &mut Vec<u8>, file_length_bytes: usize, points: &[Point]) -> CoordResult<()> {
        out.write_i32::<BigEndian>(FILE_CODE)?;
        for _ in 0..5 {
            out.write_i32::<BigEndian>(0)?;
        }
        // Length is counted in 16-bit words
        out.write_i32::<BigEndian>((file_length_bytes / 2) as i32)?;
        out.write_i32::<LittleEndian>(VERSION)?;
        out.write_i32::<LittleEndian>(SHAPE_TYPE_POINT)?;

        let (min_x, min_y, max_x, max_y) = bounds(points);
        for value in [min_x, min_y, max_x, max_y, 0.0, 0.0, 0.0, 0.0] {
            out.write_f64::<LittleEndian>(value)?;
        }
        Ok(())
    }

    /// Encode the `.shp` geometry file
    pub fn encode_shp(points: &[Point], progress: &ProgressTracker) -> CoordResult<Vec<u8>> {
        let length = HEADER_SIZE + points.len() * (RECORD_HEADER_SIZE + POINT_CONTENT_SIZE);
        let mut out = Vec::with_capacity(length);
        Self::write_header(&mut out, length, points)?;

        for (i, point) in points.iter().enumerate() {
            out.write_i32::<BigEndian>(i as i32 + 1)?;
            out.write_i32::<BigEndian>((POINT_CONTENT_SIZE / 2) as i32)?;
            out.write_i32::<LittleEndian>(SHAPE_TYPE_POINT)?;
            out.write_f64::<LittleEndian>(point.x)?;
            out.write_f64::<LittleEndian>(point.y)?;
            progress.increment(1);
        }
        Ok(out)
    }

    /// Encode the `.shx` index file
    pub fn encode_shx(points: &[Point]) -> CoordResult<Vec<u8>> {
        let length = HEADER_SIZE + points.len() * RECORD_HEADER_SIZE;
        let mut out = Vec::with_capacity(length);
        Self::write_header(&mut out, length, points)?;

        for i in 0..points.len() {
            let offset = HEADER_SIZE + i * (RECORD_HEADER_SIZE + POINT_CONTENT_SIZE);
            out.write_i32::<BigEndian>((offset / 2) as i32)?;
            out.write_i32::<BigEndian>((POINT_CONTENT_SIZE / 2) as i32)?;
        }
        Ok(out)
    }

    /// Encode the dBASE III attribute table with a single FID column
    pub fn encode_dbf(count: usize, date: NaiveDate) -> CoordResult<Vec<u8>> {
        let header_length: u16 = 32 + 32 + 1;
        let record_length: u16 = 1 + FID_WIDTH as u16;

        let mut out = Vec::with_capacity(header_length as usize + count * record_length as usize + 1);
        out.write_u8(0x03)?;
        out.write_u8((date.year() - 1900).clamp(0, 255) as u8)?;
        out.write_u8(date.month() as u8)?;
        out.write_u8(date.day() as u8)?;
        out.write_u32::<LittleEndian>(count as u32)?;
        out.write_u16::<LittleEndian>(header_length)?;
        out.write_u16::<LittleEndian>(record_length)?;
        out.write_all(&[0u8; 20])?;

        // Field descriptor
        let mut name = [0u8; 11];
        name[..3].copy_from_slice(b"FID");
        out.write_all(&name)?;
        out.write_u8(b'N')?;
        out.write_all(&[0u8; 4])?;
        out.write_u8(FID_WIDTH)?;
        out.write_u8(0)?;
        out.write_all(&[0u8; 14])?;
        out.write_u8(0x0D)?;

        for i in 0..count {
            out.write_u8(b' ')?;
            write!(out, "{:>width$}", i, width = FID_WIDTH as usize)?;
        }
        out.write_u8(0x1A)?;
        Ok(out)
    }
}

fn bounds(points: &[Point]) -> (f64, f64, f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    points.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(min_x, min_y, max_x, max_y), p| (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y)),
    )
}
