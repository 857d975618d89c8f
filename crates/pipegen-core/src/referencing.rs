//! Chemical-shift referencing: temperature-dependent water proton shift and
//! heteronuclear carrier conversion.

use crate::domain::Nucleus;

/// Linear fit of the water proton chemical shift (ppm) against temperature
/// (Celsius); the proton carrier is put on the water resonance.
pub const WATER_SHIFT_INTERCEPT_PPM: f64 = 5.01165675545;
pub const WATER_SHIFT_SLOPE_PPM_PER_C: f64 = -0.00955018024414;

pub fn water_proton_shift_ppm(temperature_celsius: f64) -> f64 {
    WATER_SHIFT_INTERCEPT_PPM + temperature_celsius * WATER_SHIFT_SLOPE_PPM_PER_C
}

/// Converts the proton carrier position into the carrier of another
/// observed nucleus, in ppm.
///
/// `proton_frequency_mhz` and `observe_frequency_mhz` are the spectrometer
/// observation frequencies of 1H and of the target nucleus.
pub fn carrier_ppm(
    proton_carrier_ppm: f64,
    proton_frequency_mhz: f64,
    observe_frequency_mhz: f64,
    nucleus: Nucleus,
) -> f64 {
    observe_frequency_mhz * (1.0e6 + proton_carrier_ppm)
        / (nucleus.referencing_ratio() * proton_frequency_mhz)
        - 1.0e6
}

#[cfg(test)]
mod tests {
    use super::{carrier_ppm, water_proton_shift_ppm};
    use crate::domain::Nucleus;

    #[test]
    fn water_shift_at_twenty_five_celsius_matches_the_fit() {
        let shift = water_proton_shift_ppm(25.0);
        assert!((shift - 4.7729022493465).abs() < 1.0e-10);
    }

    #[test]
    fn water_shift_is_linear_in_temperature() {
        let at_ten = water_proton_shift_ppm(10.0);
        let at_twenty = water_proton_shift_ppm(20.0);
        let at_thirty = water_proton_shift_ppm(30.0);
        assert!(((at_twenty - at_ten) - (at_thirty - at_twenty)).abs() < 1.0e-12);
    }

    #[test]
    fn proton_carrier_conversion_is_the_identity() {
        // ratio(H) = 1 and matching frequencies collapse the conversion.
        let carrier = carrier_ppm(4.773, 599.821, 599.821, Nucleus::Hydrogen);
        assert!((carrier - 4.773).abs() < 1.0e-6);
    }

    #[test]
    fn nitrogen_carrier_uses_the_nitrogen_ratio() {
        let proton_carrier = 4.773;
        let freq_h = 599.821;
        let freq_n = 60.776;
        let expected =
            freq_n * (1.0e6 + proton_carrier) / (0.101329118 * freq_h) - 1.0e6;
        let carrier = carrier_ppm(proton_carrier, freq_h, freq_n, Nucleus::Nitrogen);
        assert!((carrier - expected).abs() < 1.0e-9);
    }

    #[test]
    fn carrier_is_linear_in_the_observe_frequency() {
        let one = carrier_ppm(4.773, 599.821, 1.0, Nucleus::Carbon) + 1.0e6;
        let doubled = carrier_ppm(4.773, 599.821, 2.0, Nucleus::Carbon) + 1.0e6;
        assert!((doubled - 2.0 * one).abs() < 1.0e-6);
    }
}
