//! Configuration access port trait.

/// Typed access to a keyed configuration source.
///
/// Absent keys are `Ok(None)`; a present value that fails to parse is an
/// `Err` carrying the underlying parse message, so callers fail fast instead
/// of silently running with a default.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, String>;
    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, String>;
}
