use std::{path::PathBuf, str::FromStr, time::Duration};

use clap::ArgMatches;
use nalgebra::{vector, Point3, Vector2, Vector3};
use raymarch_lib::{
    color::ColorMode,
    render::{MaskOverlayParameters, RenderParameters},
    RenderOptions,
};

use crate::defaults;

fn parse_value<T>(args: &ArgMatches, key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
{
    args.value_of(key)
        .map(|v| v.parse::<T>().map_err(|_| format!("Bad value of {key}: {v}")))
        .transpose()
}

fn parse_values<T>(args: &ArgMatches, key: &str) -> Result<Option<Vec<T>>, String>
where
    T: FromStr,
{
    args.values_of(key)
        .map(|vals| {
            vals.map(|v| v.parse::<T>().map_err(|_| format!("Bad value of {key}: {v}")))
                .collect()
        })
        .transpose()
}

fn values_to_vector3(args: &ArgMatches, key: &str) -> Result<Option<Vector3<f32>>, String> {
    match parse_values::<f32>(args, key)?.as_deref() {
        None => Ok(None),
        Some(&[x, y, z]) => Ok(Some(vector![x, y, z])),
        Some(_) => Err(format!("Expected 3 values of {key}")),
    }
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    pub volumes_dir: PathBuf,
    pub volume: Option<String>,
    pub mask: Option<String>,
    pub params: RenderParameters,
    pub overlay: MaskOverlayParameters,
    pub render_options: RenderOptions,
    pub camera_position: Point3<f32>,
    pub fov: Option<f32>,
    pub load_timeout: Option<Duration>,
    pub output_file: PathBuf,
}

impl Config {
    pub fn from_args(args: ArgMatches) -> Result<Config, String> {
        let volumes_dir = args
            .value_of_os("volumes-dir")
            .ok_or("Missing volumes directory")?
            .into();
        let output_file = args
            .value_of_os("output-file")
            .ok_or("Missing output file")?
            .into();

        // Render parameters
        let mut params = RenderParameters::default();
        if let Some(clip) = values_to_vector3(&args, "clip")? {
            params.clip_planes = clip;
        }
        if let Some(tf) = parse_value(&args, "transfer-function")? {
            params.transfer_function = tf;
        }
        if let Some(name) = args.value_of("color-mode") {
            params.color_mode =
                ColorMode::from_name(name).ok_or_else(|| format!("Unknown color mode {name}"))?;
        }
        if let Some(brightness) = parse_value(&args, "brightness")? {
            params.brightness = brightness;
        }
        if let Some(contrast) = parse_value(&args, "contrast")? {
            params.contrast = contrast;
        }

        let mut overlay = MaskOverlayParameters {
            show_mask: args.is_present("show-mask"),
            ..Default::default()
        };
        if let Some(opacity) = parse_value(&args, "mask-opacity")? {
            overlay.mask_opacity = opacity;
        }

        // Render options
        let resolution = match parse_values::<u16>(&args, "resolution")?.as_deref() {
            None => defaults::RENDER_RESOLUTION,
            Some(&[w, h]) => Vector2::new(w, h),
            Some(_) => return Err("Expected 2 values of resolution".into()),
        };
        let render_options = RenderOptions::builder()
            .resolution(resolution)
            .early_ray_termination(defaults::ERT && !args.is_present("no-ert"))
            .multi_thread(defaults::MULTI_THREAD && !args.is_present("single-thread"))
            .build()?;

        let camera_position = values_to_vector3(&args, "camera")?
            .map(Point3::from)
            .unwrap_or(defaults::CAM_POS);

        Ok(Config {
            volumes_dir,
            volume: args.value_of("volume").map(String::from),
            mask: args.value_of("mask").map(String::from),
            params,
            overlay,
            render_options,
            camera_position,
            fov: parse_value(&args, "fov")?,
            load_timeout: parse_value(&args, "timeout")?.map(Duration::from_secs),
            output_file,
        })
    }
}
