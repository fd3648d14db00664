//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

pub fn is_positive_number(num: &str) -> Result<(), String> {
    match num.parse::<u16>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0".into()),
        Err(_) => Err("Number in range <1;65535> required".into()),
    }
}

pub fn is_finite_number(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n.is_finite() => Ok(()),
        Ok(_) => Err("Number must be finite".into()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_unit_number(num: &str) -> Result<(), String> {
    is_finite_number(num)?;
    match num.parse::<f32>() {
        Ok(n) if (0.0..=1.0).contains(&n) => Ok(()),
        _ => Err("Number must be in range <0;1>".into()),
    }
}

pub fn is_clip_number(num: &str) -> Result<(), String> {
    is_finite_number(num)?;
    match num.parse::<f32>() {
        Ok(n) if (-1.0..=1.0).contains(&n) => Ok(()),
        _ => Err("Number must be in range <-1;1>".into()),
    }
}

pub const COLOR_MODE_NAMES: &[&str] = &["grayscale", "heatmap", "rainbow"];

fn vector3_arg<'a>(name: &'a str, help: &'a str) -> Arg<'a> {
    Arg::new(name)
        .help(help)
        .long(name)
        .number_of_values(3)
        .value_names(&["X", "Y", "Z"])
        .use_value_delimiter(true)
        .require_value_delimiter(true)
        .require_equals(true)
        .allow_hyphen_values(true)
}

pub fn get_command<'a>() -> Command<'a> {
    Command::new("Vol-render")
        .version("0.1.0")
        .about("Renders one frame of a volume with an optional mask overlay")
        .arg(
            Arg::new("volumes-dir")
                .help("Directory with .vol files")
                .long("volumes-dir")
                .value_name("DIR")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::DirPath)
                .default_value_os(OsStr::new(crate::defaults::VOLUMES_DIR)),
        )
        .arg(
            Arg::new("volume")
                .help("Id of the volume, demo sphere when left out")
                .long("volume")
                .short('v')
                .value_name("ID"),
        )
        .arg(
            Arg::new("mask")
                .help("Id of the segmentation mask")
                .long("mask")
                .short('m')
                .value_name("ID"),
        )
        .arg(
            Arg::new("show-mask")
                .help("Overlay the mask")
                .long("show-mask"),
        )
        .arg(
            Arg::new("mask-opacity")
                .help("Opacity of the mask overlay")
                .long("mask-opacity")
                .value_name("VALUE")
                .default_value("0.5")
                .validator(is_unit_number),
        )
        .arg(
            vector3_arg("clip", "Clip planes in <-1;1> per axis")
                .default_values(&["0", "0", "0"])
                .validator(is_clip_number),
        )
        .arg(
            Arg::new("transfer-function")
                .help("Opacity threshold")
                .long("transfer-function")
                .short('t')
                .value_name("VALUE")
                .default_value("0.1")
                .validator(is_unit_number),
        )
        .arg(
            Arg::new("color-mode")
                .help("Color mapping of densities")
                .long("color-mode")
                .short('c')
                .value_name("MODE")
                .default_value("grayscale")
                .possible_values(COLOR_MODE_NAMES),
        )
        .arg(
            Arg::new("brightness")
                .help("Density multiplier")
                .long("brightness")
                .value_name("VALUE")
                .default_value("1.0")
                .validator(is_finite_number),
        )
        .arg(
            Arg::new("contrast")
                .help("Contrast around 0.5")
                .long("contrast")
                .value_name("VALUE")
                .default_value("1.0")
                .validator(is_finite_number),
        )
        .arg(
            Arg::new("resolution")
                .help("Output image size")
                .long("resolution")
                .short('r')
                .number_of_values(2)
                .value_names(&["W", "H"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            vector3_arg("camera", "Camera position, looks at the center")
                .validator(is_finite_number),
        )
        .arg(
            Arg::new("fov")
                .help("Vertical field of view in degrees")
                .long("fov")
                .value_name("DEG")
                .validator(is_finite_number),
        )
        .arg(
            Arg::new("single-thread")
                .help("Render on one thread")
                .long("single-thread"),
        )
        .arg(
            Arg::new("no-ert")
                .help("Disable early ray termination")
                .long("no-ert"),
        )
        .arg(
            Arg::new("timeout")
                .help("Load timeout in seconds")
                .long("timeout")
                .value_name("SECS")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("output-file")
                .help("PNG file to write")
                .long("output-file")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value_os(OsStr::new(crate::defaults::OUTPUT_FILE)),
        )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn command_is_consistent() {
        get_command().debug_assert();
    }

    #[test]
    fn validators() {
        assert!(is_unit_number("0.3").is_ok());
        assert!(is_unit_number("1.5").is_err());
        assert!(is_positive_number("0").is_err());
        assert!(is_positive_number("70000").is_err());
        assert!(is_finite_number("NaN").is_err());
        assert!(is_clip_number("-0.5").is_ok());
        assert!(is_clip_number("-1.5").is_err());
    }

    #[test]
    fn clip_out_of_range_rejected() {
        let res = get_command().try_get_matches_from(["vol_render", "--clip=0,2,0"]);
        assert!(res.is_err());
    }
}
