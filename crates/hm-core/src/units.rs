// hm-core/src/units.rs
//
// The translator works in IP units (ft, ft2, ft3, hr-ft2-F/Btu) like its inputs.
// These helpers produce canonical SI quantities for export.

use uom::si::f64::{Area as UomArea, Length as UomLength, Volume as UomVolume};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;
pub type Volume = UomVolume;

/// hr-ft2-F/Btu -> m2-K/W
pub const R_IP_TO_SI: f64 = 0.176_110_2;

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn ft2(v: f64) -> Area {
    use uom::si::area::square_foot;
    Area::new::<square_foot>(v)
}

#[inline]
pub fn ft3(v: f64) -> Volume {
    use uom::si::volume::cubic_foot;
    Volume::new::<cubic_foot>(v)
}

#[inline]
pub fn meters(l: Length) -> f64 {
    use uom::si::length::meter;
    l.get::<meter>()
}

#[inline]
pub fn square_meters(a: Area) -> f64 {
    use uom::si::area::square_meter;
    a.get::<square_meter>()
}

#[inline]
pub fn cubic_meters(v: Volume) -> f64 {
    use uom::si::volume::cubic_meter;
    v.get::<cubic_meter>()
}

/// Convert an IP R-value to RSI.
#[inline]
pub fn r_ip_to_si(r_ip: f64) -> f64 {
    r_ip * R_IP_TO_SI
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    #[test]
    fn foot_conversions() {
        let tol = Tolerances::default();
        assert!(nearly_equal(meters(ft(1.0)), 0.3048, tol));
        assert!(nearly_equal(square_meters(ft2(1.0)), 0.092_903_04, tol));
        assert!(nearly_equal(cubic_meters(ft3(1.0)), 0.028_316_846_592, tol));
        assert!(nearly_equal(cubic_meters(ft3(1000.0)), 28.316_846_592, tol));
    }

    #[test]
    fn r_value_conversion() {
        assert!((r_ip_to_si(1.0) - 0.1761102).abs() < 1e-7);
    }
}
