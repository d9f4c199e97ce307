//! Grid directory naming convention.
//!
//! Directory names encode the grid identity positionally:
//!
//! - chars 0..3: opacity model (`b20` = Blouin 2020, `c07` = Cassisi 2007)
//! - chars 3..5: atmosphere (`DA` = hydrogen, `DB` = helium)
//! - chars 6..8: metallicity code (`po`, `00`, `01`, `02`, `03`, `04`)

use crate::domain::{Atmosphere, GridDescriptor, OpacityModel};
use crate::error::GridError;

/// Derive a descriptor from a grid directory name.
pub fn parse_grid_name(name: &str) -> Result<GridDescriptor, GridError> {
    let fail = |field: &'static str| GridError::NameFormat {
        name: name.to_string(),
        field,
    };

    let opacity_model = match name.get(0..3) {
        Some("b20") => OpacityModel::Blouin20,
        Some("c07") => OpacityModel::Cassisi07,
        _ => return Err(fail("opacity model")),
    };

    let atmosphere = match name.get(3..5) {
        Some("DA") => Atmosphere::Hydrogen,
        Some("DB") => Atmosphere::Helium,
        _ => return Err(fail("atmosphere type")),
    };

    let metallicity = match name.get(6..8) {
        Some("po") => 0.0,
        Some("00") => 0.006,
        Some("01") => 0.01,
        Some("02") => 0.02,
        Some("03") => 0.03,
        Some("04") => 0.04,
        _ => return Err(fail("metallicity")),
    };

    Ok(GridDescriptor {
        opacity_model,
        atmosphere,
        metallicity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_fields() {
        let d = parse_grid_name("b20DA_02_wd").unwrap();
        assert_eq!(d.opacity_model, OpacityModel::Blouin20);
        assert_eq!(d.atmosphere, Atmosphere::Hydrogen);
        assert_eq!(d.metallicity, 0.02);

        let d = parse_grid_name("c07DB-po").unwrap();
        assert_eq!(d.opacity_model, OpacityModel::Cassisi07);
        assert_eq!(d.atmosphere, Atmosphere::Helium);
        assert_eq!(d.metallicity, 0.0);

        assert_eq!(parse_grid_name("b20DB_00").unwrap().metallicity, 0.006);
    }

    #[test]
    fn reports_which_field_failed() {
        let cases = [
            ("x20DA_02", "opacity model"),
            ("b20DC_02", "atmosphere type"),
            ("b20DA_09", "metallicity"),
            ("b20DA", "metallicity"),
            ("", "opacity model"),
        ];
        for (name, expected) in cases {
            match parse_grid_name(name) {
                Err(GridError::NameFormat { field, .. }) => assert_eq!(field, expected, "{name}"),
                other => panic!("{name}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn non_ascii_names_do_not_panic() {
        assert!(parse_grid_name("b2é0DA_02").is_err());
    }
}
