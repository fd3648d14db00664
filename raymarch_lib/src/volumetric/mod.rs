pub mod codec;
mod data_source;
pub mod demo;
mod scalar_volume;
mod source;
mod texture;
mod volume;

pub use codec::{decode, decode_with, encode, encode_with, Endianness};
pub use data_source::DataSource;
pub use scalar_volume::{voxel_count, ScalarVolume};
pub use source::{DirectorySource, MemorySource, VolumeSource};
pub use texture::{TextureLimits, TextureProvisioner, VolumeTexture};
pub use volume::Volume;
