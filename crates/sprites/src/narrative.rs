/// Script-execution engine that advances narrative flow.
///
/// The registry only ever asks it to jump; nothing is returned.
#[cfg_attr(test, mockall::automock)]
pub trait NarrativeController {
    /// Transfer script execution to `label`.
    fn jump_to_label(&self, label: &str);
}
