#![cfg(feature = "std")]

use std::path::Path;

use csv::ReaderBuilder;
use qbvoxel::{
    Error,
    avec::{Sink, stream::StreamDecoder},
    sans::{matrix::MatrixDescriptor, voxel::Voxel},
};

#[test]
fn decode_slice_three() {
    const PATH: &str = "fixtures/three.qb";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    let len = qbvoxel::avec::decode_slice(&data, &mut validator).unwrap();
    assert_eq!(len, data.len());
    validator.finish();
}

#[test]
fn decode_slice_layers() {
    const PATH: &str = "fixtures/layers.qb";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    let len = qbvoxel::avec::decode_slice(&data, &mut validator).unwrap();
    assert_eq!(len, data.len());
    validator.finish();
}

#[test]
fn decode_reader_three() {
    const PATH: &str = "fixtures/three.qb";
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    qbvoxel::avec::decode_reader(&mut file, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_layers() {
    const PATH: &str = "fixtures/layers.qb";
    let mut validator = Validator::new(PATH);
    qbvoxel::avec::decode_file(PATH, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_stream_bytewise_three() {
    const PATH: &str = "fixtures/three.qb";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    let mut decoder = StreamDecoder::new(&mut validator);
    for b in data.chunks(1) {
        assert_eq!(decoder.feed(b), 1);
    }
    assert!(decoder.is_finished());
    assert_eq!(decoder.last_error(), None);
    drop(decoder);
    validator.finish();
}

#[test]
fn decode_stream_bytewise_layers() {
    const PATH: &str = "fixtures/layers.qb";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    let mut decoder = StreamDecoder::new(&mut validator);
    for b in data.chunks(1) {
        assert_eq!(decoder.feed(b), 1);
    }
    assert!(decoder.is_finished());
    let flags = decoder.flags();
    assert!(flags.bgra() && flags.right_handed() && flags.side_masks());
    assert!(!flags.rle());
    drop(decoder);
    validator.finish();
}

/// Checks every sink call against the rows of a CSV file next to a fixture.
struct Validator(Vec<Vec<String>>);

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let mut expected: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();
        expected.reverse();

        Self(expected)
    }

    fn expect(&mut self, row: Vec<String>) {
        assert_eq!(self.0.pop(), Some(row));
    }

    fn finish(&self) {
        assert!(self.0.is_empty(), "missing calls: {:?}", self.0);
    }
}

impl Sink for Validator {
    fn resize(&mut self, count: u32) -> Result<(), Error> {
        self.expect(vec!["resize".into(), count.to_string()]);
        Ok(())
    }

    fn set_matrix(&mut self, index: u32, matrix: &MatrixDescriptor) -> Result<(), Error> {
        let [px, py, pz] = matrix.position;
        let [sx, sy, sz] = matrix.size;
        let mut row = vec![
            "matrix".into(),
            index.to_string(),
            matrix.name.to_str().unwrap().to_string(),
        ];
        row.extend([px, py, pz].map(|v| v.to_string()));
        row.extend([sx, sy, sz].map(|v| v.to_string()));
        self.expect(row);
        Ok(())
    }

    fn write_voxel(
        &mut self,
        index: u32,
        x: u32,
        y: u32,
        z: u32,
        voxel: Voxel,
    ) -> Result<(), Error> {
        let Voxel { r, g, b, a } = voxel;
        let mut row = vec![String::from("voxel")];
        row.extend([index, x, y, z].map(|v| v.to_string()));
        row.extend([r, g, b, a].map(|v| v.to_string()));
        self.expect(row);
        Ok(())
    }
}
