/// ProgressReporter port for reporting progress during operations
///
/// This port abstracts user-facing progress output (e.g., to stderr) so
/// exploration can give feedback without touching stdout, where the report goes.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports that another package was resolved
    ///
    /// # Arguments
    /// * `resolved` - Number of packages resolved so far in this build
    /// * `package` - The package that was just resolved
    fn report_activity(&self, resolved: usize, package: &str);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
