//! State updaters: how a node's delta is merged into the accumulated state.

use std::fmt::Debug;
use std::sync::Arc;

/// Controls how a node's returned delta is folded into the current state.
///
/// The default ([`ReplaceUpdater`]) replaces the whole state. Workflows that
/// accumulate conversation history install a custom updater at graph build
/// time (see `crate::state::MergeUpdater`).
pub trait StateUpdater<S>: Send + Sync + Debug
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Merges `update` (the node's output) into `current`.
    fn apply_update(&self, current: &mut S, update: &S);
}

/// Default updater: the node's return value replaces the previous state.
#[derive(Debug, Clone, Default)]
pub struct ReplaceUpdater;

impl<S> StateUpdater<S> for ReplaceUpdater
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn apply_update(&self, current: &mut S, update: &S) {
        *current = update.clone();
    }
}

/// Shared updater handle stored in compiled graphs.
pub type BoxedStateUpdater<S> = Arc<dyn StateUpdater<S>>;

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: ReplaceUpdater discards the previous state entirely.
    #[test]
    fn replace_updater_replaces_state() {
        let updater = ReplaceUpdater;
        let mut current = vec!["old".to_string()];
        let update = vec!["new".to_string()];
        updater.apply_update(&mut current, &update);
        assert_eq!(current, vec!["new".to_string()]);
    }
}
