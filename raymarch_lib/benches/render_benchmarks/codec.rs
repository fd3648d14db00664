use criterion::{black_box, Criterion};
use nalgebra::vector;
use raymarch_lib::volumetric::{decode, demo, encode, TextureProvisioner};

use crate::common::VOLUME_SIDE;

pub fn decode_volume(c: &mut Criterion) {
    let side = VOLUME_SIDE;
    let volume = demo::sphere_volume(vector![side, side, side]);
    let bytes = encode(&volume).unwrap();

    c.bench_function("decode", |b| {
        b.iter(|| decode(black_box(&bytes)).unwrap());
    });
}

pub fn decode_and_provision(c: &mut Criterion) {
    let side = VOLUME_SIDE;
    let volume = demo::sphere_volume(vector![side, side, side]);
    let bytes = encode(&volume).unwrap();
    let provisioner = TextureProvisioner::default();

    c.bench_function("decode, provision", |b| {
        b.iter(|| {
            let volume = decode(black_box(&bytes)).unwrap();
            provisioner.provision(&volume).unwrap()
        });
    });
}
