/// Knobs for a [`Context`](crate::Context).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    /// Run [`validate_use_lists`](crate::validator::validate_use_lists) after every bulk
    /// rewrite and panic if the def-use lists got corrupted. Off by default since the check walks
    /// the whole context.
    pub verify_use_lists: bool,
}
