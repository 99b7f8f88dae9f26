use miette::Diagnostic;

#[derive(thiserror::Error, Diagnostic, Debug)]
#[error("conan install failed for {failed} of {total} project directories")]
pub(crate) struct InstallFailed {
    pub failed: usize,
    pub total: usize,
}
