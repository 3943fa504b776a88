/// Physical constants used in entry calculations

/// Energy equivalent of one kiloton of TNT in joules
pub const JOULES_PER_KILOTON: f64 = 4.184e12;

/// Scale factor converting an energy gradient in J/m to kilotons of TNT
/// per kilometre
///
/// Altitudes are carried in metres throughout the solver, so dividing a
/// joule-per-metre gradient by this constant yields kt/km directly.
pub const DEDZ_TO_KILOTON_PER_KM: f64 = 4.184e9;

/// Default cap on integration steps before the solver reports
/// non-convergence
///
/// A 100 km entry at the default 0.05 s output step finishes in a few
/// thousand steps; the cap only bounds pathological constant choices that
/// would otherwise never satisfy a stop condition.
pub const DEFAULT_MAX_STEPS: usize = 10_000_000;
