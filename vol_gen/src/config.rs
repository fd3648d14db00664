use std::{ffi::OsString, str::FromStr};

use clap::ArgMatches;
use nalgebra::{vector, Vector3};
use raymarch_lib::volumetric::Endianness;

/// Parse value of `key`, values are checked by validators already
fn parse_value<T>(args: &ArgMatches, key: &str) -> Result<T, String>
where
    T: FromStr,
{
    let value = args
        .value_of(key)
        .ok_or_else(|| format!("Missing value of {key}"))?;
    value
        .parse::<T>()
        .map_err(|_| format!("Bad value of {key}: {value}"))
}

/// Transform `Values` into `Vector`
fn values_to_vector3<T>(args: &ArgMatches, key: &str) -> Result<Vector3<T>, String>
where
    T: FromStr + Copy,
{
    let vals = args
        .values_of(key)
        .ok_or_else(|| format!("Missing value of {key}"))?
        .map(|v| v.parse::<T>().map_err(|_| format!("Bad value of {key}: {v}")))
        .collect::<Result<Vec<T>, String>>()?;
    match vals[..] {
        [x, y, z] => Ok(vector![x, y, z]),
        _ => Err(format!("Expected 3 values of {key}")),
    }
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    /// Dimensions of volume
    pub dims: Vector3<usize>,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    /// Min-max normalize before writing
    pub normalize: bool,
    /// Byte order of the payload
    pub payload_order: Endianness,
    // Output file name
    pub file_name: OsString,
}

impl Config {
    pub fn from_args(args: ArgMatches) -> Result<Config, String> {
        let dims = values_to_vector3(&args, "dims")?;
        let generator = GeneratorConfig::from_args(&args)?;
        let normalize = args.is_present("normalize");
        let payload_order = match args.value_of("byte-order") {
            Some("big") => Endianness::Big,
            _ => Endianness::Little,
        };
        let file_name = args
            .value_of_os("output-file")
            .ok_or("Missing output file")?
            .into();

        Ok(Config {
            dims,
            generator,
            normalize,
            payload_order,
            file_name,
        })
    }
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneratorConfig {
    /// Density falling off from the center
    Sphere,
    /// Labeled concentric shells
    Mask,
    /// Solid volume with an empty border
    Solid { sample: f32, padding: usize },
    /// Randomly placed cuboids and spheres
    Shapes {
        n_of_shapes: usize,
        sample: f32,
        sample_variance: f32,
        obj_size: usize,
        seed: Option<u64>,
    },
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches) -> Result<GeneratorConfig, String> {
        let name = args.value_of("generator").ok_or("Missing generator")?;

        let config = match name {
            "sphere" => GeneratorConfig::Sphere,
            "mask" => GeneratorConfig::Mask,
            "solid" => GeneratorConfig::Solid {
                sample: parse_value(args, "sample")?,
                padding: parse_value(args, "padding")?,
            },
            "shapes" => GeneratorConfig::Shapes {
                n_of_shapes: parse_value(args, "n-of-shapes")?,
                sample: parse_value(args, "sample")?,
                sample_variance: parse_value(args, "sample-variance")?,
                obj_size: parse_value(args, "object-size")?,
                seed: match args.value_of("seed") {
                    Some(_) => Some(parse_value(args, "seed")?),
                    None => None,
                },
            },
            _ => return Err(format!("Unknown generator {name}")),
        };
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::args::get_command;

    fn config_of(args: &[&str]) -> Result<Config, String> {
        let matches = get_command()
            .try_get_matches_from(args)
            .map_err(|e| e.to_string())?;
        Config::from_args(matches)
    }

    #[test]
    fn sphere_defaults() {
        let cfg = config_of(&["vol_gen", "--dims=16,8,4", "-g", "sphere"]).unwrap();

        assert_eq!(cfg.dims, vector![16, 8, 4]);
        assert_eq!(cfg.generator, GeneratorConfig::Sphere);
        assert!(!cfg.normalize);
        assert_eq!(cfg.payload_order, Endianness::Little);
        assert_eq!(cfg.file_name, OsString::from("a.vol"));
    }

    #[test]
    fn shapes_with_seed() {
        let cfg = config_of(&[
            "vol_gen",
            "--dims=32,32,32",
            "-g",
            "shapes",
            "--seed",
            "7",
            "--n-of-shapes",
            "3",
            "--byte-order",
            "big",
            "--normalize",
        ])
        .unwrap();

        assert_eq!(
            cfg.generator,
            GeneratorConfig::Shapes {
                n_of_shapes: 3,
                sample: 1.0,
                sample_variance: 0.1,
                obj_size: 16,
                seed: Some(7),
            }
        );
        assert!(cfg.normalize);
        assert_eq!(cfg.payload_order, Endianness::Big);
    }

    #[test]
    fn zero_dimension_rejected() {
        assert!(config_of(&["vol_gen", "--dims=0,8,8", "-g", "solid"]).is_err());
    }
}
