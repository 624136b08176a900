#![cfg(feature = "std")]

mod support;

use pretty_assertions::assert_eq;
use qbvoxel::{
    Error,
    avec::{
        Sink,
        model::{Limits, Model},
        stream::StreamDecoder,
    },
    sans::{
        matrix::{MatrixDescriptor, Name},
        voxel::Voxel,
    },
};
use support::{LAYERS, THREE, header, matrix};

#[test]
fn decode_three() {
    let mut model = Model::new();
    qbvoxel::avec::decode_slice(THREE, &mut model).unwrap();

    let [layer] = model.matrices() else {
        panic!("expected one matrix");
    };
    let descriptor = layer.descriptor();
    assert_eq!(descriptor.name.to_str(), Ok("Layer.1"));
    assert_eq!(descriptor.position, [-5, 0, -3]);
    assert_eq!(descriptor.size, [3, 3, 3]);

    let voxels = layer.voxels();
    assert_eq!(voxels.len(), 27);
    assert_eq!(voxels[0], Voxel::new(50, 60, 57, 255));
    assert_eq!(voxels[26], Voxel::new(106, 190, 48, 255));
    assert_eq!(voxels[24], Voxel::new(106, 190, 48, 255));
    assert_eq!(voxels[6], Voxel::new(106, 190, 48, 255));
    assert_eq!(layer.voxel(0, 2, 0), Some(voxels[6]));
    assert_eq!(layer.voxel(3, 0, 0), None);

    assert_eq!(layer.as_bytes().len(), 27 * 4);
    assert_eq!(&layer.as_bytes()[..4], &[50, 60, 57, 255]);
    assert_eq!(layer.as_bytes(), &THREE[56..]);
}

#[test]
fn decode_layers() {
    let mut model = Model::new();
    qbvoxel::avec::decode_slice(LAYERS, &mut model).unwrap();

    let matrices = model.matrices();
    assert_eq!(matrices.len(), 3);
    assert_eq!(matrices[0].voxel(1, 0, 1), Some(Voxel::new(33, 23, 13, 60)));
    assert!(matrices[1].descriptor().name.is_empty());
    assert_eq!(matrices[1].voxel(0, 1, 0), Some(Voxel::new(51, 101, 201, 65)));
    assert_eq!(matrices[2].descriptor().position, [i32::MIN, i32::MAX, 7]);
    assert!(matrices[2].voxels().is_empty());

    assert_eq!(model.get_matrix(2).unwrap(), *matrices[2].descriptor());
    assert_eq!(model.read_voxel(0, 0, 0, 1), Ok(Voxel::new(32, 22, 12, 61)));
    assert_eq!(model.read_voxel(3, 0, 0, 0), Err(Error::OutOfRange));
}

#[test]
fn single_matrix_limit() {
    let mut model = Model::with_limits(Limits {
        max_matrices: Some(1),
        ..Default::default()
    });

    assert_eq!(
        qbvoxel::avec::decode_slice(LAYERS, &mut model),
        Err(Error::UnsupportedMatrixCount.into())
    );
    assert!(qbvoxel::avec::decode_slice(THREE, &mut model).is_ok());
    assert_eq!(model.matrices().len(), 1);
}

#[test]
fn voxel_limit() {
    let mut model = Model::with_limits(Limits {
        max_voxels: 26,
        ..Default::default()
    });
    assert_eq!(model.limits().max_voxels, 26);

    assert_eq!(
        qbvoxel::avec::decode_slice(THREE, &mut model),
        Err(Error::OutOfMemory.into())
    );
}

#[test]
fn oversized_matrix() {
    let mut r = header([0, 0, 0, 0, 1]);
    r.extend(matrix("huge", [u32::MAX, u32::MAX, u32::MAX], [0, 0, 0]));

    let mut model = Model::new();
    assert_eq!(
        qbvoxel::avec::decode_slice(&r, &mut model),
        Err(Error::OutOfMemory.into())
    );
}

#[test]
fn sink_bounds_checks() {
    let mut model = Model::new();
    model.resize(2).unwrap();

    let descriptor = MatrixDescriptor {
        name: Name::try_from("box").unwrap(),
        position: [1, 2, 3],
        size: [2, 3, 4],
    };
    assert_eq!(model.set_matrix(2, &descriptor), Err(Error::OutOfRange));
    model.set_matrix(1, &descriptor).unwrap();
    assert_eq!(model.get_matrix(1), Ok(descriptor.clone()));
    assert_eq!(model.get_matrix(0), Ok(MatrixDescriptor::default()));

    let voxel = Voxel::new(1, 2, 3, 4);
    model.write_voxel(1, 1, 2, 3, voxel).unwrap();
    assert_eq!(model.read_voxel(1, 1, 2, 3), Ok(voxel));
    assert_eq!(model.matrices()[1].voxels()[1 + (2 + 3 * 3) * 2], voxel);
    assert_eq!(model.write_voxel(1, 2, 0, 0, voxel), Err(Error::OutOfRange));
    assert_eq!(model.write_voxel(1, 0, 3, 0, voxel), Err(Error::OutOfRange));
    assert_eq!(model.write_voxel(1, 0, 0, 4, voxel), Err(Error::OutOfRange));
    assert_eq!(model.write_voxel(0, 0, 0, 0, voxel), Err(Error::OutOfRange));

    model.resize(0).unwrap();
    assert!(model.matrices().is_empty());
    assert_eq!(model.get_matrix(0), Err(Error::OutOfRange));
}

#[test]
fn default_limits_refuse_huge_matrix_counts() {
    assert_eq!(Limits::default().max_matrices, Some(Limits::MAX_MATRICES));

    for count in [u32::MAX, 20_000_000] {
        let mut model = Model::new();
        let mut decoder = StreamDecoder::new(&mut model);
        assert_eq!(decoder.feed(&header([0, 0, 0, 0, count])), 24);
        assert_eq!(decoder.last_error(), Some(Error::UnsupportedMatrixCount));
        drop(decoder);
        assert!(model.matrices().is_empty());
    }
}

#[test]
fn declared_count_allocates_nothing() {
    let mut model = Model::with_limits(Limits {
        max_matrices: None,
        ..Default::default()
    });

    let mut r = header([0, 0, 0, 0, u32::MAX]);
    r.extend(matrix("a", [1, 1, 1], [0, 0, 0]));
    r.extend([1, 2, 3, 4]);

    let mut decoder = StreamDecoder::new(&mut model);
    assert_eq!(decoder.feed(&r), r.len());
    assert_eq!(decoder.last_error(), None);
    assert_eq!(decoder.matrix_index(), Some(1));
    drop(decoder);

    assert_eq!(model.count(), u32::MAX);
    assert_eq!(model.matrices().len(), 1);
    assert_eq!(model.matrices()[0].voxels(), &[Voxel::new(1, 2, 3, 4)]);
}

#[test]
fn default_voxel_limit() {
    let mut r = header([0, 0, 0, 0, 1]);
    r.extend(matrix("big", [1 << 10, 1 << 10, 1 << 10], [0, 0, 0]));

    let mut model = Model::new();
    assert_eq!(
        qbvoxel::avec::decode_slice(&r, &mut model),
        Err(Error::OutOfMemory.into())
    );
    assert!(model.matrices().is_empty());
}
