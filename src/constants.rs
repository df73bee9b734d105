use anise::constants::SPEED_OF_LIGHT_KM_S;

/// Earth angular velocity, in WGS84 frame rad/s
pub const EARTH_ANGULAR_VEL_RAD: f64 = 7.2921151467E-5;

/// Speed of light in m.s⁻¹
pub const SPEED_OF_LIGHT_M_S: f64 = SPEED_OF_LIGHT_KM_S * 1000.0;

/// Maximal time gap (in seconds) tolerated between a request and
/// the first (or last) sample of a precise product.
pub(crate) const MAX_PRODUCT_GAP_S: f64 = 900.0;

/// Orbit extrapolation error (m.s⁻²)
pub(crate) const ORBIT_EXTRAPOLATION_ERR_M_S2: f64 = 5.0E-7;

/// Clock extrapolation error (m.s⁻¹)
pub(crate) const CLOCK_EXTRAPOLATION_ERR_M_S: f64 = 1.0E-3;
