//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

// up to 32bit value
pub fn is_positive_number(num: &str) -> Result<(), String> {
    let n = num.parse::<u32>();
    match n {
        Ok(n) => {
            if n > 0 {
                Ok(())
            } else {
                Err("Number must be greater than 0".into())
            }
        }
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_finite_number(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n.is_finite() => Ok(()),
        Ok(_) => Err("Number must be finite".into()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_non_negative_number(num: &str) -> Result<(), String> {
    is_finite_number(num)?;
    match num.parse::<f32>() {
        Ok(n) if n >= 0.0 => Ok(()),
        _ => Err("Number must not be negative".into()),
    }
}

pub const GENERATOR_NAMES: &[&str] = &["sphere", "solid", "shapes", "mask"];
pub const BYTE_ORDER_NAMES: &[&str] = &["little", "big"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("Vol-gen")
        .version("0.1.0")
        .about("Generates volumes in the raymarcher wire format")
        .arg(
            Arg::new("dims")
                .help("Dimensions of volume")
                .long("dims")
                .short('d')
                .required(true)
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("generator")
                .help("Type of generator")
                .long("generator")
                .short('g')
                .required(true)
                .takes_value(true)
                .value_name("NAME")
                .possible_values(GENERATOR_NAMES),
        )
        .arg(
            Arg::new("sample")
                .help("Value of generated objects")
                .long("sample")
                .value_name("VALUE")
                .default_value("1.0")
                .validator(is_finite_number),
        )
        .arg(
            Arg::new("sample-variance")
                .help("Random spread of object values")
                .long("sample-variance")
                .value_name("VALUE")
                .default_value("0.1")
                .validator(is_non_negative_number),
        )
        .arg(
            Arg::new("n-of-shapes")
                .help("Number of shapes generated in volume")
                .long("n-of-shapes")
                .value_name("N")
                .default_value("10")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("object-size")
                .help("Size of individual generated objects")
                .long("object-size")
                .value_name("SIDE")
                .default_value("16")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("padding")
                .help("Empty border around the solid volume")
                .long("padding")
                .value_name("VOXELS")
                .default_value("0")
                .validator(|s| s.parse::<u32>().map(|_| ()).map_err(|e| e.to_string())),
        )
        .arg(
            Arg::new("seed")
                .help("Seed for RNG, leave out for random seed")
                .long("seed")
                .value_name("SEED")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("byte-order")
                .help("Byte order of the payload")
                .long("byte-order")
                .value_name("ORDER")
                .default_value("little")
                .possible_values(BYTE_ORDER_NAMES),
        )
        .arg(
            Arg::new("normalize")
                .help("Map values to <0;1> before writing")
                .long("normalize")
                .short('n'),
        )
        .arg(
            Arg::new("output-file")
                .help("File name to output")
                .long("output-file")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value_os(OsStr::new("a.vol")),
        )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validators() {
        assert!(is_positive_number("3").is_ok());
        assert!(is_positive_number("0").is_err());
        assert!(is_positive_number("-1").is_err());
        assert!(is_finite_number("-0.5").is_ok());
        assert!(is_finite_number("inf").is_err());
        assert!(is_non_negative_number("0").is_ok());
        assert!(is_non_negative_number("-0.1").is_err());
    }

    #[test]
    fn command_is_consistent() {
        get_command().debug_assert();
    }

    #[test]
    fn requires_dims() {
        let res = get_command().try_get_matches_from(["vol_gen", "-g", "sphere"]);
        assert!(res.is_err());
    }
}
