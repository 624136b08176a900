#![allow(dead_code)]

use qbvoxel::{
    Error,
    avec::Sink,
    sans::{
        codec::{write_i32_le, write_u32_le},
        matrix::MatrixDescriptor,
        voxel::Voxel,
    },
};

pub const THREE: &[u8] = include_bytes!("../../fixtures/three.qb");
pub const LAYERS: &[u8] = include_bytes!("../../fixtures/layers.qb");

/// A sink call, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Resize(u32),
    SetMatrix(u32, MatrixDescriptor),
    WriteVoxel(u32, [u32; 3], Voxel),
}

/// Records every call, optionally failing one kind of call.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    pub fail_resize: Option<Error>,
    pub fail_set_matrix: Option<Error>,
    pub fail_write_voxel: Option<(usize, Error)>,
}

impl Recorder {
    pub fn voxel_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::WriteVoxel(..)))
            .count()
    }
}

impl Sink for Recorder {
    fn resize(&mut self, count: u32) -> Result<(), Error> {
        self.events.push(Event::Resize(count));
        self.fail_resize.map_or(Ok(()), Err)
    }

    fn set_matrix(&mut self, index: u32, matrix: &MatrixDescriptor) -> Result<(), Error> {
        self.events.push(Event::SetMatrix(index, matrix.clone()));
        self.fail_set_matrix.map_or(Ok(()), Err)
    }

    fn write_voxel(
        &mut self,
        index: u32,
        x: u32,
        y: u32,
        z: u32,
        voxel: Voxel,
    ) -> Result<(), Error> {
        self.events.push(Event::WriteVoxel(index, [x, y, z], voxel));
        match self.fail_write_voxel {
            Some((n, err)) if self.voxel_count() > n => Err(err),
            _ => Ok(()),
        }
    }
}

/// Build a file header from its fields.
pub fn header(fields: [u32; 5]) -> Vec<u8> {
    let mut r = vec![1, 1, 0, 0];
    for field in fields {
        r.extend(write_u32_le(field));
    }
    r
}

/// Build a matrix header: name length, name, size and position.
pub fn matrix(name: &str, size: [u32; 3], position: [i32; 3]) -> Vec<u8> {
    let mut r = vec![name.len() as u8];
    r.extend(name.as_bytes());
    for s in size {
        r.extend(write_u32_le(s));
    }
    for p in position {
        r.extend(write_i32_le(p));
    }
    r
}
